//! Content type inference from file extensions

/// Extension (lowercase, without dot) to MIME type
const TYPES: &[(&str, &str)] = &[
    // Documents
    ("html", "text/html"),
    ("htm", "text/html"),
    ("css", "text/css"),
    ("js", "application/javascript"),
    ("mjs", "application/javascript"),
    ("json", "application/json"),
    ("map", "application/json"),
    ("xml", "application/xml"),
    ("xsl", "application/xml"),
    ("txt", "text/plain"),
    ("text", "text/plain"),
    ("md", "text/markdown"),
    ("csv", "text/csv"),
    ("rtf", "application/rtf"),
    ("pdf", "application/pdf"),
    ("ps", "application/postscript"),
    ("wasm", "application/wasm"),
    ("webmanifest", "application/manifest+json"),
    ("doc", "application/msword"),
    ("dot", "application/msword"),
    ("xls", "application/vnd.ms-excel"),
    ("ppt", "application/vnd.ms-powerpoint"),
    ("sh", "application/x-sh"),
    // Images
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("jpe", "image/jpeg"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("svg", "image/svg+xml"),
    ("webp", "image/webp"),
    ("ico", "image/vnd.microsoft.icon"),
    ("avif", "image/avif"),
    // Fonts
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
    ("ttf", "font/ttf"),
    ("otf", "font/otf"),
    // Media
    ("mp3", "audio/mpeg"),
    ("wav", "audio/x-wav"),
    ("ogg", "audio/ogg"),
    ("mp4", "video/mp4"),
    ("mpeg", "video/mpeg"),
    ("mpg", "video/mpeg"),
    ("mpe", "video/mpeg"),
    ("mov", "video/quicktime"),
    ("qt", "video/quicktime"),
    ("avi", "video/x-msvideo"),
    ("webm", "video/webm"),
    // Archives
    ("zip", "application/zip"),
    ("tar", "application/x-tar"),
];

/// Compression suffixes that describe an encoding rather than a type
const ENCODINGS: &[&str] = &["gz", "bz2", "xz", "br", "z"];

/// Shorthand archive extensions and the type they expand to
const ARCHIVE_ALIASES: &[&str] = &["tgz", "taz", "tz", "tbz2", "txz"];

fn split_extension(name: &str) -> Option<(&str, &str)> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some((stem, ext))
}

fn lookup(ext: &str) -> Option<&'static str> {
    let ext = ext.to_ascii_lowercase();
    TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
}

/// Guess the MIME type of `filename` from its extension.
///
/// A trailing compression suffix is stripped first, so `app.js.gz` is
/// `application/javascript`. Returns `None` when the name has no extension
/// or the extension is not known; such objects are uploaded without a
/// content type.
pub fn guess(filename: &str) -> Option<&'static str> {
    let (stem, ext) = split_extension(filename)?;
    let ext = ext.to_ascii_lowercase();

    if ARCHIVE_ALIASES.contains(&ext.as_str()) {
        return lookup("tar");
    }

    if ENCODINGS.contains(&ext.as_str()) {
        let (_, inner) = split_extension(stem)?;
        return lookup(inner);
    }

    lookup(&ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_common_web_assets() {
        assert_eq!(guess("index.html"), Some("text/html"));
        assert_eq!(guess("style.css"), Some("text/css"));
        assert_eq!(guess("app.js"), Some("application/javascript"));
        assert_eq!(guess("a.txt"), Some("text/plain"));
        assert_eq!(guess("logo.svg"), Some("image/svg+xml"));
        assert_eq!(guess("photo.jpeg"), Some("image/jpeg"));
    }

    #[test]
    fn test_guess_less_common_types() {
        assert_eq!(guess("a.bmp"), Some("image/bmp"));
        assert_eq!(guess("a.tif"), Some("image/tiff"));
        assert_eq!(guess("a.tiff"), Some("image/tiff"));
        assert_eq!(guess("a.jpe"), Some("image/jpeg"));
        assert_eq!(guess("a.mov"), Some("video/quicktime"));
        assert_eq!(guess("a.avi"), Some("video/x-msvideo"));
        assert_eq!(guess("a.mpeg"), Some("video/mpeg"));
        assert_eq!(guess("a.tar"), Some("application/x-tar"));
        assert_eq!(guess("a.doc"), Some("application/msword"));
        assert_eq!(guess("a.sh"), Some("application/x-sh"));
    }

    #[test]
    fn test_guess_strips_compression_suffix() {
        assert_eq!(guess("app.js.gz"), Some("application/javascript"));
        assert_eq!(guess("style.css.br"), Some("text/css"));
        assert_eq!(guess("data.json.bz2"), Some("application/json"));
        assert_eq!(guess("backup.tar.xz"), Some("application/x-tar"));
        assert_eq!(guess("page.HTML.GZ"), Some("text/html"));
    }

    #[test]
    fn test_guess_compressed_without_inner_extension() {
        assert_eq!(guess("archive.gz"), None);
        assert_eq!(guess("notes.unknown.gz"), None);
    }

    #[test]
    fn test_guess_archive_aliases() {
        assert_eq!(guess("release.tgz"), Some("application/x-tar"));
        assert_eq!(guess("release.tbz2"), Some("application/x-tar"));
    }

    #[test]
    fn test_guess_case_insensitive() {
        assert_eq!(guess("PHOTO.JPG"), Some("image/jpeg"));
        assert_eq!(guess("Index.HTML"), Some("text/html"));
    }

    #[test]
    fn test_guess_uses_last_extension() {
        assert_eq!(guess("bundle.min.js"), Some("application/javascript"));
        assert_eq!(guess("data.json.bak"), None);
    }

    #[test]
    fn test_guess_unknown_or_missing_extension() {
        assert_eq!(guess("README"), None);
        assert_eq!(guess("file.unknownext"), None);
        assert_eq!(guess("trailing."), None);
    }

    #[test]
    fn test_guess_dotfile_has_no_extension() {
        assert_eq!(guess(".html"), None);
        assert_eq!(guess(".html.gz"), None);
    }
}
