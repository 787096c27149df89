//! Input validation helpers
//!
//! Single validation path for configurations and files: everything is
//! checked here, unconditionally, before any row is written. Nothing relies
//! on optional model-level hooks.

use shared::error::{AppError, AppResult};
use shared::models::{FileInput, FormatClass, PrintConfigurationInput, SmallFormat};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product names, file names, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Notification messages and free-text options
pub const MAX_MESSAGE_LEN: usize = 500;

/// Mobile-money phone contact
pub const MAX_PHONE_LEN: usize = 15;

// ── Configuration bounds ────────────────────────────────────────────

/// Large-format physical bounds in cm (inclusive)
pub const MAX_WIDTH_CM: f64 = 160.0;
pub const MAX_HEIGHT_CM: f64 = 100.0;

const VALID_RESOLUTIONS: [i64; 2] = [150, 300];
const VALID_EXTENSIONS: [&str; 3] = [".pdf", ".jpg", ".jpeg"];
const VALID_COLOR_PROFILES: [&str; 2] = ["CMJN", "CMYK"];

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(value: &Option<String>, field: &str, max_len: usize) -> AppResult<()> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate a mobile-money phone contact
pub fn validate_phone(value: &str) -> AppResult<()> {
    validate_required_text(value, "phone", MAX_PHONE_LEN)?;
    if !value.chars().all(|c| c.is_ascii_digit() || c == '+') {
        return Err(AppError::validation("phone may only contain digits and +"));
    }
    Ok(())
}

/// Minimum order quantity per small format
pub fn min_quantity(format: SmallFormat) -> i64 {
    match format {
        SmallFormat::A5 => 30,
        SmallFormat::A4 => 20,
        SmallFormat::A3 => 10,
        SmallFormat::Custom => 50,
    }
}

/// Validate a print configuration against every construction invariant.
///
/// Books are exempt from the per-size minimum quantities: they are priced
/// per page and a single bound copy is a legitimate order.
pub fn validate_configuration(cfg: &PrintConfigurationInput) -> AppResult<()> {
    if cfg.quantity < 1 {
        return Err(AppError::validation("quantity must be at least 1"));
    }

    match cfg.format_class {
        Some(FormatClass::Grand) => {
            let (Some(width), Some(height)) = (cfg.width_cm, cfg.height_cm) else {
                return Err(AppError::validation(
                    "large format requires both width and height",
                ));
            };
            if width <= 0.0 || height <= 0.0 {
                return Err(AppError::validation("dimensions must be positive"));
            }
            if width > MAX_WIDTH_CM || height > MAX_HEIGHT_CM {
                return Err(AppError::validation(format!(
                    "large format is limited to {MAX_WIDTH_CM}x{MAX_HEIGHT_CM} cm"
                )));
            }
        }
        Some(FormatClass::Petit) | None => {
            if let Some(format) = cfg.small_format
                && !cfg.is_book
            {
                let min = min_quantity(format);
                if cfg.quantity < min {
                    return Err(AppError::validation(format!(
                        "minimum quantity for {format:?} is {min}"
                    )));
                }
            }
        }
    }

    if cfg.is_book {
        match cfg.book_pages {
            Some(pages) if pages > 0 => {}
            _ => {
                return Err(AppError::validation(
                    "a book order requires a positive page count",
                ));
            }
        }
    } else if cfg.product_id.is_none() {
        return Err(AppError::validation(
            "a non-book order requires a product reference",
        ));
    }

    validate_optional_text(&cfg.options, "options", MAX_MESSAGE_LEN)?;

    Ok(())
}

/// Validate an uploaded file's declared metadata.
pub fn validate_file(file: &FileInput) -> AppResult<()> {
    validate_required_text(&file.file_name, "file name", MAX_NAME_LEN)?;
    validate_required_text(&file.handle, "file handle", MAX_NAME_LEN)?;

    let lower = file.file_name.to_lowercase();
    if !VALID_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        return Err(AppError::validation(
            "file must be .pdf, .jpg or .jpeg",
        ));
    }

    if !VALID_RESOLUTIONS.contains(&file.resolution_dpi) {
        return Err(AppError::validation(
            "resolution must be 150dpi or 300dpi",
        ));
    }

    if !VALID_COLOR_PROFILES.contains(&file.color_profile.to_uppercase().as_str()) {
        return Err(AppError::validation(
            "color profile must be CMJN or CMYK",
        ));
    }

    if file.size_kb <= 0.0 {
        return Err(AppError::validation("file size must be positive"));
    }

    Ok(())
}
