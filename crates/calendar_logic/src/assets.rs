//! Page image manifest and the all-settled load join.
//!
//! The loader is generic over the host's image handle type so it can be
//! driven by Bevy's asset server as well as by plain test doubles.

use tracing::{debug, info, warn};

use crate::config::{AssetSettings, PAGE_COUNT};
use crate::LOG_ASSETS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageSide {
    Front,
    Back,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub page: usize,
    pub side: PageSide,
    pub path: String,
}

/// Naming scheme of the page images.
///
/// Images are numbered from 1: the first [`PAGE_COUNT`] are the fronts of
/// pages 0.., the next [`PAGE_COUNT`] the backs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetManifest {
    directory: String,
    file_prefix: String,
    file_suffix: String,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self::from_settings(&AssetSettings::default())
    }
}

impl AssetManifest {
    pub fn from_settings(settings: &AssetSettings) -> Self {
        Self {
            directory: settings.directory.clone(),
            file_prefix: settings.file_prefix.clone(),
            file_suffix: settings.file_suffix.clone(),
        }
    }

    /// Path of image `number` (1-based), relative to the asset root.
    pub fn image_path(&self, number: usize) -> String {
        format!(
            "{}/{}{:02}{}",
            self.directory, self.file_prefix, number, self.file_suffix
        )
    }

    pub fn requests(&self) -> Vec<ImageRequest> {
        let sides = [(PageSide::Front, 1), (PageSide::Back, PAGE_COUNT + 1)];
        sides
            .into_iter()
            .flat_map(|(side, first)| {
                (0..PAGE_COUNT).map(move |page| (side, page, first + page))
            })
            .map(|(side, page, number)| ImageRequest {
                page,
                side,
                path: self.image_path(number),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Pending,
    Loaded,
    Failed,
}

/// Texture of one page side: the loaded image or the generated placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum PageTexture<H> {
    Image(H),
    Placeholder,
}

impl<H> PageTexture<H> {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, PageTexture::Placeholder)
    }
}

/// One texture per side of every page. Complete by construction.
#[derive(Debug, Clone)]
pub struct PageAssets<H> {
    front: Vec<PageTexture<H>>,
    back: Vec<PageTexture<H>>,
}

impl<H> PageAssets<H> {
    pub fn front(&self, page: usize) -> Option<&PageTexture<H>> {
        self.front.get(page)
    }

    pub fn back(&self, page: usize) -> Option<&PageTexture<H>> {
        self.back.get(page)
    }

    pub fn side(&self, page: usize, side: PageSide) -> Option<&PageTexture<H>> {
        match side {
            PageSide::Front => self.front(page),
            PageSide::Back => self.back(page),
        }
    }

    pub fn placeholder_count(&self) -> usize {
        self.front
            .iter()
            .chain(&self.back)
            .filter(|texture| texture.is_placeholder())
            .count()
    }
}

struct PendingImage<H> {
    request: ImageRequest,
    handle: H,
    settled: Option<LoadStatus>,
}

/// Tracks the page image loads until every one of them has settled.
pub struct PageAssetLoader<H> {
    images: Vec<PendingImage<H>>,
}

impl<H: Clone> PageAssetLoader<H> {
    /// Issues every load of the manifest at once through `load`.
    pub fn issue(manifest: &AssetManifest, mut load: impl FnMut(&ImageRequest) -> H) -> Self {
        let images: Vec<_> = manifest
            .requests()
            .into_iter()
            .map(|request| PendingImage {
                handle: load(&request),
                request,
                settled: None,
            })
            .collect();
        info!(target: LOG_ASSETS, "requested {} page images", images.len());
        Self { images }
    }

    pub fn total(&self) -> usize {
        self.images.len()
    }

    pub fn settled_count(&self) -> usize {
        self.images
            .iter()
            .filter(|image| image.settled.is_some())
            .count()
    }

    pub fn handles(&self) -> impl Iterator<Item = &H> {
        self.images.iter().map(|image| &image.handle)
    }

    /// Checks every unsettled load and returns the page textures once all of
    /// them have either loaded or failed. Failures turn into placeholders.
    pub fn poll(&mut self, mut status: impl FnMut(&H) -> LoadStatus) -> Option<PageAssets<H>> {
        for image in self.images.iter_mut().filter(|i| i.settled.is_none()) {
            match status(&image.handle) {
                LoadStatus::Pending => {}
                LoadStatus::Loaded => {
                    debug!(target: LOG_ASSETS, "loaded {}", image.request.path);
                    image.settled = Some(LoadStatus::Loaded);
                }
                LoadStatus::Failed => {
                    warn!(
                        target: LOG_ASSETS,
                        "failed to load {}, using placeholder", image.request.path
                    );
                    image.settled = Some(LoadStatus::Failed);
                }
            }
        }

        if self.settled_count() < self.total() {
            return None;
        }

        let mut front: Vec<Option<PageTexture<H>>> = vec![None; PAGE_COUNT];
        let mut back: Vec<Option<PageTexture<H>>> = vec![None; PAGE_COUNT];
        for image in &self.images {
            let texture = match image.settled {
                Some(LoadStatus::Loaded) => PageTexture::Image(image.handle.clone()),
                _ => PageTexture::Placeholder,
            };
            let slots = match image.request.side {
                PageSide::Front => &mut front,
                PageSide::Back => &mut back,
            };
            if let Some(slot) = slots.get_mut(image.request.page) {
                *slot = Some(texture);
            }
        }

        let complete = |slots: Vec<Option<PageTexture<H>>>| -> Vec<PageTexture<H>> {
            slots
                .into_iter()
                .map(|slot| slot.unwrap_or(PageTexture::Placeholder))
                .collect()
        };
        let assets = PageAssets {
            front: complete(front),
            back: complete(back),
        };
        info!(
            target: LOG_ASSETS,
            "page images settled, {} placeholder(s)",
            assets.placeholder_count()
        );
        Some(assets)
    }
}
