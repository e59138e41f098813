//! File exports and document loading.
//!
//! Image exports render the workspace region at an identity viewport, then
//! put the view back with an auto-zoom.

use super::Editor;
use crate::EditorError;
use crate::viewport;
use pc_core::SceneDocument;
use pc_core::kurbo::{Affine, Rect};
use pc_render::{RasterFormat, RasterOptions, encode, rasterize, render_svg};
use uuid::Uuid;

/// A file ready to hand to the browser's download link.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    /// `<uuid>.<extension>`.
    pub file_name: String,
    pub mime: &'static str,
    pub data: Vec<u8>,
}

impl ExportFile {
    fn new(extension: &str, mime: &'static str, data: Vec<u8>) -> Self {
        Self {
            file_name: format!("{}.{extension}", Uuid::new_v4()),
            mime,
            data,
        }
    }
}

impl Editor {
    /// The document as pretty-printed JSON.
    pub fn save_as_json(&self) -> Result<ExportFile, EditorError> {
        let scene = self.scene().ok_or(EditorError::NotInitialized)?;
        let json = scene.to_document().to_pretty_json()?;
        Ok(ExportFile::new("json", "application/json", json.into_bytes()))
    }

    pub fn save_as_svg(&mut self) -> Result<ExportFile, EditorError> {
        let svg = self.with_export_view(|objects, crop| {
            Ok(render_svg(objects, Affine::IDENTITY, crop))
        })?;
        Ok(ExportFile::new("svg", "image/svg+xml", svg.into_bytes()))
    }

    pub fn save_as_png(&mut self) -> Result<ExportFile, EditorError> {
        self.save_as_raster(RasterFormat::Png)
    }

    pub fn save_as_jpeg(&mut self) -> Result<ExportFile, EditorError> {
        self.save_as_raster(RasterFormat::Jpeg)
    }

    fn save_as_raster(&mut self, format: RasterFormat) -> Result<ExportFile, EditorError> {
        let multiplier = self.config.export_multiplier;
        let quality = self.config.export_quality;
        let data = self.with_export_view(|objects, crop| {
            let pixels = rasterize(objects, Affine::IDENTITY, &RasterOptions { crop, multiplier })?;
            Ok(encode(&pixels, format, quality)?)
        })?;
        Ok(ExportFile::new(format.extension(), format.mime(), data))
    }

    /// Run `render` against the scene objects with the viewport reset and the
    /// workspace frame as the crop. The view is restored even when `render`
    /// fails.
    fn with_export_view<T>(
        &mut self,
        render: impl FnOnce(&[pc_core::SceneObject], Rect) -> Result<T, EditorError>,
    ) -> Result<T, EditorError> {
        let session = self.session.as_mut().ok_or(EditorError::NotInitialized)?;
        let crop = session
            .scene
            .workspace()
            .map(|ws| ws.frame())
            .ok_or(EditorError::MissingWorkspace)?;
        session.scene.set_viewport(Affine::IDENTITY);
        log::trace!("export crop {crop:?}");
        let result = render(session.scene.objects(), crop);
        viewport::auto_zoom(&mut session.scene, session.container, self.config.fit_margin);
        result
    }

    /// Replace the scene with a serialized document and refit the view.
    /// The load is recorded in history.
    pub fn load_from_json(&mut self, json: &str) -> Result<(), EditorError> {
        let session = self.session.as_mut().ok_or(EditorError::NotInitialized)?;
        let doc = SceneDocument::from_json(json)?;
        session.scene.load_document(doc);
        viewport::auto_zoom(&mut session.scene, session.container, self.config.fit_margin);
        self.sync();
        Ok(())
    }
}
