//! File classification by extension.
//!
//! Pure lookup on the lower-cased final extension of the last path segment.
//! Unknown extensions highlight as `text`; only `html`/`htm` get a preview.

use crate::models::FileClassification;

pub const FALLBACK_LANGUAGE: &str = "text";

const PREVIEWABLE_EXTENSIONS: &[&str] = &["html", "htm"];

// Prism language identifiers.
const LANGUAGES: &[(&str, &str)] = &[
    ("html", "markup"),
    ("htm", "markup"),
    ("xml", "markup"),
    ("svg", "markup"),
    ("js", "javascript"),
    ("mjs", "javascript"),
    ("cjs", "javascript"),
    ("ts", "typescript"),
    ("jsx", "jsx"),
    ("tsx", "tsx"),
    ("css", "css"),
    ("scss", "scss"),
    ("less", "less"),
    ("json", "json"),
    ("md", "markdown"),
    ("mdx", "markdown"),
    ("py", "python"),
    ("rb", "ruby"),
    ("go", "go"),
    ("rs", "rust"),
    ("java", "java"),
    ("kt", "kotlin"),
    ("swift", "swift"),
    ("c", "c"),
    ("h", "c"),
    ("cpp", "cpp"),
    ("cc", "cpp"),
    ("hpp", "cpp"),
    ("cs", "csharp"),
    ("php", "php"),
    ("sh", "bash"),
    ("bash", "bash"),
    ("zsh", "bash"),
    ("yaml", "yaml"),
    ("yml", "yaml"),
    ("toml", "toml"),
    ("ini", "ini"),
    ("sql", "sql"),
    ("txt", "text"),
    ("log", "text"),
];

const BINARY_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "bmp", "ico", "pdf", "zip", "gz", "tgz", "tar", "7z",
    "rar", "woff", "woff2", "ttf", "otf", "eot", "mp3", "mp4", "wav", "ogg", "webm", "exe", "dll",
    "so", "dylib", "wasm", "class", "jar", "bin",
];

pub fn classify(path: &str) -> FileClassification {
    let extension = extension_of(path);
    let highlight_language = LANGUAGES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, lang)| *lang)
        .unwrap_or(FALLBACK_LANGUAGE);

    FileClassification {
        is_previewable: PREVIEWABLE_EXTENSIONS.contains(&extension.as_str()),
        is_binary: BINARY_EXTENSIONS.contains(&extension.as_str()),
        highlight_language,
        extension,
    }
}

/// Lower-cased text after the last `.` of the file name. Dotfiles such as
/// `.gitignore` have no extension.
fn extension_of(path: &str) -> String {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => file_name[idx + 1..].to_ascii_lowercase(),
        _ => String::new(),
    }
}
