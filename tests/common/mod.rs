//! Helpers for integration tests.
#![allow(dead_code)]

use std::io::Cursor;

use category_media::assets::FsAssetStore;
use category_media::db::{DbPool, establish_connection_pool};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use tempfile::{NamedTempFile, TempDir};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!(); // assumes migrations/ exists

/// Temporary database used in integration tests.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempfile = NamedTempFile::new().expect("Failed to create temp file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap())
            .expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

/// Upload directory living as long as the returned guard.
pub fn temp_store() -> (TempDir, FsAssetStore) {
    let dir = TempDir::new().expect("Failed to create upload dir");
    let store = FsAssetStore::new(dir.path()).expect("Failed to open asset store");
    (dir, store)
}

/// Encodes a solid-colour image of the given size.
pub fn encoded_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let image = match format {
        ImageFormat::Png | ImageFormat::Gif => DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            Rgba([200, 40, 40, 255]),
        )),
        _ => DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([200, 40, 40]))),
    };
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, format)
        .expect("Failed to encode test image");
    bytes.into_inner()
}

/// Sorted names of the files currently inside `dir`.
pub fn stored_files(dir: &TempDir) -> Vec<String> {
    let mut names = std::fs::read_dir(dir.path())
        .expect("Failed to list upload dir")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    names.sort();
    names
}

/// Sorted names of an image and its thumbnail, as `stored_files` lists them.
pub fn pair_files(base: &str) -> Vec<String> {
    let mut names = vec![base.to_string(), format!("150x150_{base}")];
    names.sort();
    names
}
