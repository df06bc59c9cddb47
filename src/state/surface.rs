//! The image annotation surface.
//!
//! Holds at most one image and at most one name box. Drawing is
//! drag-to-draw: press to open a box, move to stretch it, release to
//! finalize. All operations are total; calls that do not apply in the
//! current state are no-ops and report `false`.

use super::geometry::{fit_within, ImageRegion, NormBox, NormPoint, PixelRect, Point, Size};
use std::path::PathBuf;

/// A decoded image as far as the surface is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResource {
    /// Where the image was loaded from.
    pub origin: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl ImageResource {
    pub fn new(origin: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            origin: origin.into(),
            width,
            height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { start: NormPoint, current: NormPoint },
}

/// Identifies one image load request. Only the latest request may complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

#[derive(Debug, Default)]
pub struct AnnotationSurface {
    image: Option<ImageResource>,
    name_box: Option<NormBox>,
    drag: DragState,
    issued: u64,
}

impl AnnotationSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(&self) -> Option<&ImageResource> {
        self.image.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// The box currently on screen: the live one while dragging, else the
    /// finalized one.
    pub fn current_box(&self) -> Option<NormBox> {
        match self.drag {
            DragState::Dragging { start, current } => Some(NormBox::new(start, current)),
            DragState::Idle => self.name_box,
        }
    }

    /// The finalized box, if any. `None` while a drag is in progress; the
    /// previous box comes back if that drag is cancelled.
    pub fn final_box(&self) -> Option<NormBox> {
        match self.drag {
            DragState::Dragging { .. } => None,
            DragState::Idle => self.name_box,
        }
    }

    /// Install a decoded image, dropping any box and any drag.
    pub fn load_image(&mut self, resource: ImageResource) {
        log::debug!(
            "Loading image {} ({}x{})",
            resource.origin.display(),
            resource.width,
            resource.height
        );
        self.image = Some(resource);
        self.name_box = None;
        self.drag = DragState::Idle;
    }

    /// Start an asynchronous load. Any earlier outstanding ticket becomes stale.
    pub fn request_load(&mut self) -> LoadTicket {
        self.issued += 1;
        LoadTicket(self.issued)
    }

    /// True when no load was requested after `ticket` and the image has not
    /// been removed since.
    pub fn is_latest(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Finish an asynchronous load. Returns `false` and leaves the surface
    /// untouched when a newer load was requested after `ticket`.
    pub fn complete_load(&mut self, ticket: LoadTicket, resource: ImageResource) -> bool {
        if !self.is_latest(ticket) {
            log::debug!(
                "Dropping stale image load {} (latest is {})",
                ticket.0,
                self.issued
            );
            return false;
        }
        self.load_image(resource);
        true
    }

    /// Clear image and box together. Idempotent. Any load still decoding
    /// is invalidated.
    pub fn remove_image(&mut self) -> bool {
        self.issued += 1;
        let had_image = self.image.take().is_some();
        self.name_box = None;
        self.drag = DragState::Idle;
        had_image
    }

    /// Open a new box at `pointer`, given in pixels local to the rendered image.
    pub fn begin_drag(&mut self, pointer: Point, rendered: Size) -> bool {
        if self.image.is_none() || self.is_dragging() {
            return false;
        }
        let Some(start) = NormPoint::from_local(pointer, rendered) else {
            return false;
        };
        self.drag = DragState::Dragging {
            start,
            current: start,
        };
        true
    }

    pub fn update_drag(&mut self, pointer: Point, rendered: Size) -> bool {
        let DragState::Dragging { start, .. } = self.drag else {
            return false;
        };
        let Some(current) = NormPoint::from_local(pointer, rendered) else {
            return false;
        };
        self.drag = DragState::Dragging { start, current };
        true
    }

    pub fn end_drag(&mut self) -> bool {
        let DragState::Dragging { start, current } = self.drag else {
            return false;
        };
        self.name_box = Some(NormBox::new(start, current));
        self.drag = DragState::Idle;
        true
    }

    /// Abandon the drag in progress. The half-drawn box is discarded and
    /// the previously finalized box, if any, is shown again.
    pub fn cancel_drag(&mut self) -> bool {
        if !self.is_dragging() {
            return false;
        }
        self.drag = DragState::Idle;
        true
    }

    /// Clear the box but keep the image. Ignored while dragging.
    pub fn remove_box(&mut self) -> bool {
        if self.is_dragging() {
            return false;
        }
        self.name_box.take().is_some()
    }

    /// Pixel rectangle of the current box inside `image_rect`, the on-screen
    /// rectangle of the rendered image.
    pub fn render_box(&self, image_rect: PixelRect) -> Option<PixelRect> {
        self.current_box().map(|b| b.to_pixels(image_rect))
    }

    /// The finalized box in the image's intrinsic pixels.
    pub fn image_region(&self) -> Option<ImageRegion> {
        let image = self.image.as_ref()?;
        self.final_box()
            .map(|b| b.to_image_region(image.width, image.height))
    }

    /// Size the image is drawn at inside `container`, keeping its aspect
    /// ratio. Zero when no image is loaded.
    pub fn fitted_size(&self, container: Size) -> Size {
        self.image
            .as_ref()
            .map(|image| fit_within(image.size(), container))
            .unwrap_or_default()
    }
}
