/// Text-art sprites loaded from disk at start-up.
///
/// Every sprite is a plain text file; the explosion sheet holds several
/// frames separated by a line containing only `---`.  Anything missing or
/// empty is a fatal start-up error.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::debug;

use crate::consts::ISLAND_VARIANTS;
use crate::entities::DecorationKind;

const FRAME_SEPARATOR: &str = "---";

/// A block of text, drawn centred on the entity position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Art {
    pub lines: Vec<String>,
}

impl Art {
    /// Trailing blank lines are dropped, leading whitespace is kept since it
    /// shapes the sprite.
    pub fn parse(text: &str) -> Result<Art> {
        let mut lines: Vec<String> = text.lines().map(|l| l.trim_end().to_string()).collect();
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        while lines.first().is_some_and(|l| l.is_empty()) {
            lines.remove(0);
        }
        if lines.is_empty() {
            bail!("sprite has no visible lines");
        }
        Ok(Art { lines })
    }

    /// Width in terminal cells.
    pub fn width(&self) -> usize {
        self.lines.iter().map(|l| l.chars().count()).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }
}

/// Split an animation sheet into frames.
pub fn parse_sheet(text: &str) -> Result<Vec<Art>> {
    let mut frames = Vec::new();
    let mut current = String::new();
    for line in text.lines() {
        if line.trim() == FRAME_SEPARATOR {
            frames.push(Art::parse(&current).with_context(|| format!("frame {}", frames.len()))?);
            current.clear();
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    if !current.trim().is_empty() {
        frames.push(Art::parse(&current).with_context(|| format!("frame {}", frames.len()))?);
    }
    if frames.is_empty() {
        bail!("sheet has no frames");
    }
    Ok(frames)
}

#[derive(Clone, Debug)]
pub struct Assets {
    pub player: Art,
    pub enemy: Art,
    pub boss: Art,
    pub islands: Vec<Art>,
    pub cloud: Art,
    pub explosion: Vec<Art>,
    pub intro: Art,
}

impl Assets {
    pub fn load(dir: &Path) -> Result<Assets> {
        let islands = (1..=ISLAND_VARIANTS)
            .map(|n| load_art(dir, &format!("island{}.txt", n)))
            .collect::<Result<Vec<_>>>()?;

        let sheet_path = dir.join("explosion.txt");
        let sheet = fs::read_to_string(&sheet_path)
            .with_context(|| format!("cannot read {}", sheet_path.display()))?;
        let explosion =
            parse_sheet(&sheet).with_context(|| format!("bad sheet {}", sheet_path.display()))?;

        let assets = Assets {
            player: load_art(dir, "player.txt")?,
            enemy: load_art(dir, "enemy.txt")?,
            boss: load_art(dir, "boss.txt")?,
            islands,
            cloud: load_art(dir, "cloud.txt")?,
            explosion,
            intro: load_art(dir, "intro.txt")?,
        };
        debug!(
            "assets loaded from {} ({} explosion frames)",
            dir.display(),
            assets.explosion.len()
        );
        Ok(assets)
    }

    pub fn decoration(&self, kind: DecorationKind) -> &Art {
        match kind {
            DecorationKind::Island(n) => {
                let i = (n.max(1) as usize - 1).min(self.islands.len() - 1);
                &self.islands[i]
            }
            DecorationKind::Cloud => &self.cloud,
        }
    }

    /// Map a simulation frame (0..total) onto however many frames the sheet
    /// actually has.
    pub fn explosion_frame(&self, frame: usize, total: usize) -> &Art {
        let i = frame * self.explosion.len() / total.max(1);
        &self.explosion[i.min(self.explosion.len() - 1)]
    }
}

fn load_art(dir: &Path, name: &str) -> Result<Art> {
    let path = dir.join(name);
    let text =
        fs::read_to_string(&path).with_context(|| format!("cannot read {}", path.display()))?;
    Art::parse(&text).with_context(|| format!("bad sprite {}", path.display()))
}
