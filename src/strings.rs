use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Base64 conveniences on string slices.
pub trait StrExt {
    /// Encodes the UTF-8 bytes of the string as standard base64.
    fn base64_encoded(&self) -> String;

    /// Decodes a standard base64 string back to UTF-8 text.
    ///
    /// `None` when the input is not valid base64 or the decoded bytes are not
    /// UTF-8.
    fn base64_decoded(&self) -> Option<String>;
}

impl StrExt for str {
    fn base64_encoded(&self) -> String { STANDARD.encode(self.as_bytes()) }

    fn base64_decoded(&self) -> Option<String> {
        let bytes = STANDARD.decode(self.as_bytes()).ok()?;
        String::from_utf8(bytes).ok()
    }
}
