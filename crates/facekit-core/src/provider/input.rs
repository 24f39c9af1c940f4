//! Image input classification.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

/// Strict alphabet check, lenient about padding and trailing bits.
///
/// Any character outside the standard alphabet fails decoding, so file paths
/// (`/`, `.` and friends in the wrong places) never pass as base64.
const STRICT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// How an image argument is sent to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Url,
    Base64,
    File,
}

impl InputType {
    /// Classify an image argument.
    ///
    /// Checked in order: anything starting with `http` is a URL (even when
    /// it would also decode as base64), then strict base64, then file.
    pub fn classify(image: &str) -> Self {
        if image.starts_with("http") {
            return InputType::Url;
        }
        if STRICT.decode(image).is_ok() {
            return InputType::Base64;
        }
        InputType::File
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Url => "url",
            InputType::Base64 => "base64",
            InputType::File => "file",
        }
    }

    /// Form field carrying the image: `image_url`, `image_base64` or `image_file`.
    pub fn field_name(&self) -> String {
        format!("image_{}", self.as_str())
    }
}

impl std::fmt::Display for InputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_win() {
        assert_eq!(InputType::classify("http://face.test/me.jpg"), InputType::Url);
        assert_eq!(InputType::classify("https://face.test/me.jpg"), InputType::Url);
        // "httpAAAA" is also valid base64
        assert_eq!(InputType::classify("httpAAAA"), InputType::Url);
    }

    #[test]
    fn test_base64() {
        assert_eq!(InputType::classify("aGVsbG8gd29ybGQ="), InputType::Base64);
        assert_eq!(InputType::classify("aGVsbG8gd29ybGQ"), InputType::Base64);
        assert_eq!(InputType::classify("/9j/4AAQSkZJRg=="), InputType::Base64);
    }

    #[test]
    fn test_files() {
        assert_eq!(InputType::classify("/tmp/face.jpg"), InputType::File);
        assert_eq!(InputType::classify("./photos/me.png"), InputType::File);
        assert_eq!(InputType::classify("not base64!"), InputType::File);
    }

    #[test]
    fn test_field_names() {
        assert_eq!(InputType::Url.field_name(), "image_url");
        assert_eq!(InputType::Base64.field_name(), "image_base64");
        assert_eq!(InputType::File.field_name(), "image_file");
        assert_eq!(InputType::File.to_string(), "file");
    }
}
