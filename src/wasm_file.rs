//! WASM file access utilities.
//!
//! The controller only sees [`FileInfo`]; the browser `File` objects behind
//! it live in a [`FileStore`] keyed by [`FileKey`] until a command needs them.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, File, FileList, FileReader};

use photocheck_ui::DomError;

use crate::model::{FileInfo, FileKey};

/// Browser files by key. Only the most recent selection is kept.
#[derive(Default)]
pub struct FileStore {
    next_key: u64,
    current: Option<(FileKey, File)>,
}

impl FileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `file` as the current selection and describe it.
    pub fn insert(&mut self, file: File) -> FileInfo {
        self.next_key += 1;
        let key = FileKey(self.next_key);
        let size = file.size().max(0.0) as u64;
        let info = FileInfo::new(key, file.name(), size, file.type_());
        self.current = Some((key, file));
        info
    }

    pub fn get(&self, key: FileKey) -> Option<File> {
        match &self.current {
            Some((current, file)) if *current == key => Some(file.clone()),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

/// First file of a picker or drop list. Extra files are ignored.
pub fn first_file(files: Option<FileList>) -> Option<File> {
    let files = files?;
    if files.length() > 1 {
        log::debug!("{} files supplied; using the first", files.length());
    }
    files.get(0)
}

/// Read `file` as a `data:` URL for the preview image.
pub async fn read_data_url(file: &File) -> Result<String, DomError> {
    let reader = FileReader::new()?;

    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let loaded = reader.clone();
        let onload = Closure::once_into_js(move |_: Event| {
            let result = loaded.result().unwrap_or(JsValue::NULL);
            let _ = resolve.call1(&JsValue::NULL, &result);
        });
        let onerror = Closure::once_into_js(move |_: Event| {
            let _ = reject.call1(&JsValue::NULL, &JsValue::from_str("Failed to read file"));
        });
        reader.set_onload(Some(onload.unchecked_ref()));
        reader.set_onerror(Some(onerror.unchecked_ref()));
    });

    reader.read_as_data_url(file)?;
    let result = JsFuture::from(promise).await?;
    result
        .as_string()
        .ok_or_else(|| DomError::Js("FileReader result is not a string".to_string()))
}
