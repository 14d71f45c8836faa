//! CLI output: user-facing error messages.

use crate::error::{ConvertError, IoErrorKind};

/// Map a conversion error to the message printed on stderr
pub fn map_error(e: &ConvertError) -> String {
    match e {
        ConvertError::Io {
            kind: IoErrorKind::NotFound,
            path,
            ..
        } => format!("Error: {:?} does not exist", path),
        ConvertError::Io {
            kind: IoErrorKind::PermissionDenied,
            path,
            ..
        } => format!("Error: permission denied for {:?}", path),
        ConvertError::DuplicateKey { key, path } => format!(
            "Error: two entries in {:?} map to key '{}' (use --on-collision overwrite to keep the later one)",
            path, key
        ),
        ConvertError::Cancelled => "Error: conversion cancelled, nothing written".to_string(),
        other => format!("Error: {}", other),
    }
}
