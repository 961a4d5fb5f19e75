//! Built-in ignore lists, extension allowlist and fence languages.

#![deny(missing_docs)]

/// Directory names that prune a subtree wherever they appear as a path component.
pub const DEFAULT_IGNORE_DIRS: &[&str] = &[
    ".git",
    "__pycache__",
    "node_modules",
    "venv",
    ".venv",
    ".idea",
    ".vscode",
    ".vs",
    "DerivedData",
    ".build",
    "Pods",
    "xcuserdata",
    "dist",
    "build",
    "out",
    "bin",
    "obj",
    ".cache",
    ".temp",
    ".tmp",
    ".sass-cache",
    "bower_components",
    "jspm_packages",
    "logs",
];

/// Patterns matched as plain substrings of a path.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    ".git",
    "__pycache__",
    ".pyc",
    ".env",
    ".venv",
    "node_modules",
    ".idea",
    ".vscode",
    ".vs",
    "*.suo",
    "*.user",
    "*.userosscache",
    "*.sln.docstates",
    "*.xcuserstate",
    "*.xcuserdatad",
    "*.xccheckout",
    "*.xcscmblueprint",
    "xcuserdata",
    "DerivedData",
    ".build",
    "Pods",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "composer.lock",
    "dist",
    "build",
    "out",
    "bin",
    "obj",
    ".cache",
    ".temp",
    ".tmp",
    ".sass-cache",
    "*.log",
    "logs",
    "npm-debug.log*",
    "yarn-debug.log*",
    "yarn-error.log*",
    ".DS_Store",
    "Thumbs.db",
    "*.swp",
    "*.bak",
    "*.backup",
];

/// File name suffixes collected by default.
pub const DEFAULT_FILE_EXTENSIONS: &[&str] = &[
    ".swift",
    ".strings",
    ".stringsdict",
    ".entitlements",
    ".xcconfig",
    ".plist",
    ".py",
    ".js",
    ".tsx",
    ".ts",
    ".jsx",
    ".java",
    ".cpp",
    ".h",
    ".hpp",
    ".c",
    ".cs",
    ".go",
    ".rs",
    ".rb",
    ".md",
    ".tex",
    ".html",
    ".css",
    ".scss",
    ".json",
    ".yml",
    ".yaml",
    ".xml",
];

/// Markdown fence language for a file extension (leading dot included).
pub fn markdown_language(ext: &str) -> Option<&'static str> {
    let lang = match ext {
        ".py" | ".pyi" | ".pyw" | ".ipynb" => "python",
        ".js" => "javascript",
        ".jsx" => "jsx",
        ".ts" => "typescript",
        ".tsx" => "tsx",
        ".rb" | ".rake" | ".gemspec" => "ruby",
        ".java" => "java",
        ".gradle" => "groovy",
        ".c" | ".h" => "c",
        ".cpp" | ".hpp" | ".cc" => "cpp",
        ".cs" => "csharp",
        ".go" => "go",
        ".rs" => "rust",
        ".swift" | ".strings" => "swift",
        ".html" | ".htm" => "html",
        ".css" => "css",
        ".scss" => "scss",
        ".sass" => "sass",
        ".less" => "less",
        ".json" => "json",
        ".yaml" | ".yml" => "yaml",
        ".toml" => "toml",
        ".ini" => "ini",
        ".conf" => "conf",
        ".sh" | ".bash" | ".zsh" => "bash",
        ".fish" => "fish",
        ".md" | ".markdown" => "markdown",
        ".tex" => "tex",
        ".xml" | ".stringsdict" | ".entitlements" | ".plist" => "xml",
        ".svg" => "svg",
        ".xcconfig" => "xcconfig",
        ".sql" => "sql",
        ".r" => "r",
        ".php" => "php",
        ".pl" => "perl",
        ".kt" | ".kts" => "kotlin",
        ".lua" => "lua",
        ".elm" => "elm",
        ".hs" => "haskell",
        ".fs" | ".fsx" => "fsharp",
        ".dart" => "dart",
        _ => return None,
    };
    Some(lang)
}
