use color_eyre::{Result, eyre::WrapErr};
use image::RgbImage;
use std::path::{Path, PathBuf};

/// Static resources loaded once at startup.
///
/// Every asset is optional: a missing file degrades the presentation but never
/// stops the game. Sounds are owned by [`crate::audio::AudioManager`].
#[derive(Debug, Default, Clone)]
pub struct Assets {
    /// None falls back to a solid black background
    pub background: Option<RgbImage>,
}

impl Assets {
    pub fn load(asset_dir: &Path) -> Self {
        let path = background_path(asset_dir);
        let background = match load_image(&path) {
            Ok(image) => {
                tracing::info!(
                    path = %path.display(),
                    width = image.width(),
                    height = image.height(),
                    "background loaded"
                );
                Some(image)
            }
            Err(err) => {
                tracing::warn!("using plain background: {err:#}");
                None
            }
        };
        Self { background }
    }

    /// Background colour of the cell at (`col`, `row`) in a `cols` x `rows` grid
    pub fn background_at(&self, col: u16, row: u16, cols: u16, rows: u16) -> (u8, u8, u8) {
        let Some(image) = &self.background else {
            return (0, 0, 0);
        };
        if cols == 0 || rows == 0 || image.width() == 0 || image.height() == 0 {
            return (0, 0, 0);
        }
        let x = (col as u64 * image.width() as u64 / cols as u64).min(image.width() as u64 - 1);
        let y = (row as u64 * image.height() as u64 / rows as u64).min(image.height() as u64 - 1);
        let [r, g, b] = image.get_pixel(x as u32, y as u32).0;
        (r, g, b)
    }

    /// Sounds live next to the images
    pub fn sound_dir(asset_dir: &Path) -> PathBuf {
        asset_dir.join("sounds")
    }
}

fn background_path(asset_dir: &Path) -> PathBuf {
    asset_dir.join("images").join("space_background.png")
}

fn load_image(path: &Path) -> Result<RgbImage> {
    let image = image::open(path)
        .wrap_err_with(|| format!("unable to load background image {}", path.display()))?;
    Ok(image.to_rgb8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_missing_background_falls_back_to_black() {
        let assets = Assets::load(Path::new("no/such/asset/dir"));
        assert!(assets.background.is_none());
        assert_eq!(assets.background_at(3, 4, 80, 24), (0, 0, 0));
    }

    #[test]
    fn test_background_is_sampled_to_grid() {
        // left half red, right half blue
        let image = RgbImage::from_fn(4, 2, |x, _| {
            if x < 2 { Rgb([255, 0, 0]) } else { Rgb([0, 0, 255]) }
        });
        let assets = Assets {
            background: Some(image),
        };
        assert_eq!(assets.background_at(0, 0, 10, 5), (255, 0, 0));
        assert_eq!(assets.background_at(4, 4, 10, 5), (255, 0, 0));
        assert_eq!(assets.background_at(5, 0, 10, 5), (0, 0, 255));
        assert_eq!(assets.background_at(9, 4, 10, 5), (0, 0, 255));
    }

    #[test]
    fn test_sound_dir() {
        assert_eq!(
            Assets::sound_dir(Path::new("assets")),
            PathBuf::from("assets/sounds")
        );
    }
}
