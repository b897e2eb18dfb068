//! Saturation editor state machine
//!
//! `Idle` until the first successful decode, `Loaded` afterwards, and
//! `Terminated` once torn down. Every transition goes through
//! [`Editor::update`], which returns an [`Outcome`] describing what the UI
//! has to do next. The preview is recomputed from the pristine original and
//! the current level after every change.

use crate::{
    Effect, ImageEffectError, ImageEffectResult,
    exporter::{self, ExportConfig, RenderedImage},
    pixel_buffer::PixelBuffer,
    saturation::{self, SaturationConfig},
};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Idle,
    Loaded,
    Terminated,
}

#[derive(Debug)]
pub enum Message {
    /// `None` when the picker was dismissed.
    FileSelected(Option<PathBuf>),
    /// Completion of the load started by `Outcome::Load` with the same `seq`.
    Decoded {
        seq: u64,
        result: ImageEffectResult<PixelBuffer>,
    },
    SaturationChanged(i32),
    /// Save the current preview into this directory.
    ExportRequested(PathBuf),
    Teardown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Nothing,
    /// Read and decode `path`, then answer with `Message::Decoded { seq, .. }`.
    Load { path: PathBuf, seq: u64 },
    /// The rendered image changed.
    Preview,
    Failed(String),
    Saved(PathBuf),
}

#[derive(Debug)]
pub struct Editor {
    state: EditorState,
    level: i32,
    original: Option<PixelBuffer>,
    rendered: Option<RenderedImage>,
    export_config: ExportConfig,
    /// Sequence number of the latest upload, `None` before the first one.
    upload_seq: Option<u64>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(saturation::DEFAULT_LEVEL)
    }
}

impl Editor {
    pub fn new(level: i32) -> Self {
        Self {
            state: EditorState::Idle,
            level: saturation::clamp_level(level),
            original: None,
            rendered: None,
            export_config: ExportConfig::default(),
            upload_seq: None,
        }
    }

    pub fn with_export_config(mut self, config: ExportConfig) -> Self {
        self.export_config = config;
        self
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn original(&self) -> Option<&PixelBuffer> {
        self.original.as_ref()
    }

    pub fn rendered(&self) -> Option<&RenderedImage> {
        self.rendered.as_ref()
    }

    /// A zero-area image has nothing to save.
    pub fn can_export(&self) -> bool {
        self.state == EditorState::Loaded
            && self.rendered.as_ref().is_some_and(|rendered| !rendered.is_empty())
    }

    pub fn update(&mut self, message: Message) -> Outcome {
        if self.state == EditorState::Terminated {
            log::debug!("editor terminated, message dropped");
            return Outcome::Nothing;
        }

        match message {
            Message::FileSelected(None) => Outcome::Nothing,
            Message::FileSelected(Some(path)) => {
                let seq = self.upload_seq.map_or(1, |seq| seq + 1);
                self.upload_seq = Some(seq);
                log::info!("load image {} (#{seq})", path.display());
                Outcome::Load { path, seq }
            }
            Message::Decoded { seq, .. } if Some(seq) != self.upload_seq => {
                log::debug!("drop stale decode #{seq}, latest is {:?}", self.upload_seq);
                Outcome::Nothing
            }
            Message::Decoded { result, .. } => self.on_decoded(result),
            Message::SaturationChanged(level) => {
                self.level = saturation::clamp_level(level);
                self.rerender()
            }
            Message::ExportRequested(dir) => self.export(dir),
            Message::Teardown => {
                self.original = None;
                self.rendered = None;
                self.transition(EditorState::Terminated);
                Outcome::Nothing
            }
        }
    }

    fn on_decoded(&mut self, result: ImageEffectResult<PixelBuffer>) -> Outcome {
        match result {
            Ok(image) => {
                log::info!("image loaded: {}x{}", image.width(), image.height());
                self.original = Some(image);
                self.rendered = None;
                self.transition(EditorState::Loaded);
                self.rerender()
            }
            Err(e) => {
                log::warn!("decode image failed: {e}");
                Outcome::Failed(format!("Load image failed. {e}"))
            }
        }
    }

    fn rerender(&mut self) -> Outcome {
        let Some(original) = self.original.as_ref() else {
            return Outcome::Nothing;
        };

        match SaturationConfig::new().with_level(self.level).apply(original) {
            Ok(pixels) => {
                self.rendered = Some(exporter::render(pixels));
                Outcome::Preview
            }
            Err(e) => {
                log::warn!("render at level {} failed: {e}", self.level);
                Outcome::Failed(format!("Render image failed. {e}"))
            }
        }
    }

    fn export(&self, dir: PathBuf) -> Outcome {
        let Some(rendered) = self.rendered.as_ref() else {
            log::warn!("export refused: {}", ImageEffectError::NoImage);
            return Outcome::Nothing;
        };

        match exporter::save(rendered, &dir, &self.export_config) {
            Ok(path) => Outcome::Saved(path),
            Err(e) => {
                log::warn!("export to {} failed: {e}", dir.display());
                Outcome::Failed(format!("Save image failed. {e}"))
            }
        }
    }

    fn transition(&mut self, state: EditorState) {
        if self.state != state {
            log::debug!("editor state: {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }
}
