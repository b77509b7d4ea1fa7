use serde::{Deserialize, Serialize};

/// Coarse file type a query can be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
	/// Text and word-processor documents.
	Document,
	/// Spreadsheets and tabular exports.
	Spreadsheet,
	/// Slide decks.
	Presentation,
	/// Raster and vector images.
	Picture,
	/// Video containers.
	Video,
	/// Audio files.
	Audio,
	/// Compressed archives.
	Archive,
	/// Installable or launchable applications.
	Application,
	/// Directories. Has no suffix mapping.
	Folder,
}

impl FileCategory {
	/// Every category, in declaration order.
	pub const ALL: [FileCategory; 9] = [
		FileCategory::Document,
		FileCategory::Spreadsheet,
		FileCategory::Presentation,
		FileCategory::Picture,
		FileCategory::Video,
		FileCategory::Audio,
		FileCategory::Archive,
		FileCategory::Application,
		FileCategory::Folder,
	];

	/// Known lowercase suffixes for this category, without the leading dot.
	#[must_use]
	pub fn suffixes(self) -> &'static [&'static str] {
		match self {
			FileCategory::Document => &["txt", "doc", "docx", "wps", "pdf", "md", "rtf", "odt"],
			FileCategory::Spreadsheet => &["xls", "xlsx", "et", "ods", "csv"],
			FileCategory::Presentation => &["ppt", "pptx", "dps", "odp"],
			FileCategory::Picture => &[
				"jpg", "jpeg", "png", "bmp", "gif", "svg", "webp", "tif", "tiff", "ico",
			],
			FileCategory::Video => &[
				"mp4", "mkv", "avi", "mov", "wmv", "flv", "webm", "rmvb", "3gp",
			],
			FileCategory::Audio => &["mp3", "wav", "flac", "ogg", "aac", "m4a", "wma", "ape"],
			FileCategory::Archive => &["zip", "rar", "7z", "tar", "gz", "bz2", "xz", "tgz"],
			FileCategory::Application => &["deb", "appimage", "desktop", "sh", "run"],
			FileCategory::Folder => &[],
		}
	}
}
