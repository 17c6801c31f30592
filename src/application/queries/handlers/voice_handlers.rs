//! Voice Query Handlers

use crate::application::error::ApplicationError;
use crate::application::queries::{GetLibraryVoice, ListLibraryVoices};
use crate::domain::voice::{library, Voice, VoiceCatalog};

/// ListLibraryVoices Handler
pub struct ListLibraryVoicesHandler {
    catalog: &'static VoiceCatalog,
}

impl ListLibraryVoicesHandler {
    pub fn new() -> Self {
        Self::with_catalog(library())
    }

    pub fn with_catalog(catalog: &'static VoiceCatalog) -> Self {
        Self { catalog }
    }

    /// 按目录顺序返回
    pub fn handle(&self, _query: ListLibraryVoices) -> Vec<Voice> {
        self.catalog.voices().to_vec()
    }
}

impl Default for ListLibraryVoicesHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// GetLibraryVoice Handler
pub struct GetLibraryVoiceHandler {
    catalog: &'static VoiceCatalog,
}

impl GetLibraryVoiceHandler {
    pub fn new() -> Self {
        Self::with_catalog(library())
    }

    pub fn with_catalog(catalog: &'static VoiceCatalog) -> Self {
        Self { catalog }
    }

    pub fn handle(&self, query: GetLibraryVoice) -> Result<Voice, ApplicationError> {
        self.catalog
            .get(&query.voice_id)
            .cloned()
            .ok_or_else(|| ApplicationError::not_found("Voice", query.voice_id))
    }
}

impl Default for GetLibraryVoiceHandler {
    fn default() -> Self {
        Self::new()
    }
}
