use std::fmt::Write;

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects, Style};
use hybrid_seek::app_dirs;
use hybrid_seek_core::search::DEFAULT_MOUNT_MARKER;

/// Version banner listing where settings are read from.
pub(super) fn long_version() -> &'static str {
	let config_dir = app_dirs::get_config_dir().map_or_else(
		|err| format!("unavailable ({err})"),
		|path| path.display().to_string(),
	);

	let mut banner = String::from(env!("CARGO_PKG_VERSION"));
	let _ = write!(
		banner,
		"\nconfig directory: {config_dir}\nenvironment prefix: HSEEK__\nmount marker: {DEFAULT_MOUNT_MARKER}"
	);

	Box::leak(banner.into_boxed_str())
}

pub(super) fn cli_styles() -> Styles {
	let accent = AnsiColor::Magenta.on_default();
	Styles::styled()
		.header(accent.effects(Effects::BOLD | Effects::UNDERLINE))
		.usage(accent.effects(Effects::BOLD))
		.literal(AnsiColor::Blue.on_default().effects(Effects::BOLD))
		.placeholder(Style::new().effects(Effects::ITALIC))
		.error(AnsiColor::Red.on_default().effects(Effects::BOLD))
		.valid(AnsiColor::Green.on_default())
		.invalid(AnsiColor::Yellow.on_default())
}
