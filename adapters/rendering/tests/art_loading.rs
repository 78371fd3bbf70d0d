use std::{fs, path::Path};

use wanderings_core::{DepthRank, ViewDirection, WallId};
use wanderings_rendering::{
    assets::sprite_file_name, save_png, ArtManifest, PngSpriteLoader, Surface,
};

fn write_sprite(root: &Path, direction: ViewDirection, rank: u32) {
    let mut sprite = Surface::new(2, 1);
    sprite.set_pixel(0, 0, [0, 0, 0, 255]);
    sprite.set_pixel(1, 0, [200, 100, u8::try_from(rank).expect("small rank"), 255]);
    save_png(&sprite, root.join(sprite_file_name(direction, rank))).expect("sprite written");
}

fn write_full_set(root: &Path) {
    fs::create_dir_all(root).expect("wall root created");
    for direction in [ViewDirection::Front, ViewDirection::Left, ViewDirection::Right] {
        for rank in 0..3 {
            write_sprite(root, direction, rank);
        }
    }
}

#[test]
fn manifest_on_disk_loads_colour_keyed_sprites() {
    let dir = tempfile::tempdir().expect("temporary directory");
    write_full_set(&dir.path().join("walls/brick"));
    let manifest_path = dir.path().join("art.toml");
    fs::write(
        &manifest_path,
        "version = 1\n\n[walls]\n1 = \"walls/brick\"\n",
    )
    .expect("manifest written");

    let manifest = ArtManifest::from_path(&manifest_path).expect("manifest should load");
    let catalog = manifest.load_catalog(&mut PngSpriteLoader);

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.loaded_count(), 9);
    let sprite = catalog
        .sprite_for(WallId::BRICK, ViewDirection::Right, DepthRank::FAR)
        .expect("far right sprite loaded");
    assert_eq!(sprite.pixel(0, 0), Some([0, 0, 0, 0]), "black is keyed out");
    assert_eq!(sprite.pixel(1, 0), Some([200, 100, 2, 255]));
}

#[test]
fn unreadable_images_leave_gaps_in_the_catalog() {
    let dir = tempfile::tempdir().expect("temporary directory");
    let root = dir.path().join("stone");
    write_full_set(&root);
    fs::write(root.join("l1.png"), b"not a png").expect("corrupt sprite written");
    fs::remove_file(root.join("f0.png")).expect("sprite removed");
    let manifest = ArtManifest::parse("version = 1\n[walls]\n1 = \"stone\"", dir.path())
        .expect("manifest should parse");

    let catalog = manifest.load_catalog(&mut PngSpriteLoader);

    assert_eq!(catalog.loaded_count(), 7);
    assert!(catalog
        .sprite_for(WallId::BRICK, ViewDirection::Left, DepthRank::MIDDLE)
        .is_none());
    assert!(catalog
        .sprite_for(WallId::BRICK, ViewDirection::Front, DepthRank::NEAR)
        .is_none());
    assert!(catalog
        .sprite_for(WallId::BRICK, ViewDirection::Front, DepthRank::MIDDLE)
        .is_some());
}

#[test]
fn missing_manifest_reports_its_path() {
    let dir = tempfile::tempdir().expect("temporary directory");
    let path = dir.path().join("absent.toml");

    let error = ArtManifest::from_path(&path).expect_err("manifest is absent");

    assert!(
        format!("{error:#}").contains("absent.toml"),
        "error should name the manifest: {error:#}"
    );
}
