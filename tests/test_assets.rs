use std::path::{Path, PathBuf};

use flying_fortress::assets::*;
use flying_fortress::consts::{EXPLOSION_FRAMES, ISLAND_VARIANTS};
use flying_fortress::entities::DecorationKind;

fn shipped_assets() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets")
}

#[test]
fn art_keeps_indentation_and_drops_blank_edges() {
    let art = Art::parse("\n  /\\\n /##\\   \n\n").unwrap();
    assert_eq!(art.lines, vec!["  /\\".to_string(), " /##\\".to_string()]);
    assert_eq!(art.width(), 5);
    assert_eq!(art.height(), 2);
}

#[test]
fn blank_art_is_rejected() {
    assert!(Art::parse("").is_err());
    assert!(Art::parse("   \n\n  ").is_err());
}

#[test]
fn sheet_splits_on_separator_lines() {
    let frames = parse_sheet(" * \n---\n(@)\n---\n . \n").unwrap();
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[1].lines, vec!["(@)".to_string()]);
}

#[test]
fn sheet_with_an_empty_frame_is_rejected() {
    assert!(parse_sheet("*\n---\n---\n.\n").is_err());
    assert!(parse_sheet("").is_err());
}

#[test]
fn shipped_assets_load() {
    let assets = Assets::load(&shipped_assets()).unwrap();
    assert_eq!(assets.islands.len(), ISLAND_VARIANTS as usize);
    assert!(!assets.explosion.is_empty());
    assert!(assets.player.width() > 0);
    assert!(assets.intro.height() > 0);
}

#[test]
fn missing_directory_is_a_clear_error() {
    let err = Assets::load(Path::new("/definitely/not/here")).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("cannot read"), "{}", message);
    assert!(message.contains("/definitely/not/here"), "{}", message);
}

#[test]
fn explosion_frames_stretch_over_animation() {
    let assets = Assets::load(&shipped_assets()).unwrap();
    let n = assets.explosion.len();
    assert_eq!(assets.explosion_frame(0, EXPLOSION_FRAMES), &assets.explosion[0]);
    assert_eq!(
        assets.explosion_frame(EXPLOSION_FRAMES - 1, EXPLOSION_FRAMES),
        &assets.explosion[n - 1]
    );
}

#[test]
fn decoration_art_by_kind() {
    let assets = Assets::load(&shipped_assets()).unwrap();
    assert_eq!(assets.decoration(DecorationKind::Cloud), &assets.cloud);
    assert_eq!(assets.decoration(DecorationKind::Island(3)), &assets.islands[2]);
}
