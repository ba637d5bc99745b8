mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use lesspass::{ClassFlags, Profile, StretchConfig, StretchFunction};

#[derive(Parser)]
#[command(
    name = "lesspass",
    version,
    author,
    about = "Stateless site password generator using PBKDF2"
)]
struct Cli {
    /// Site the password is for, e.g. example.org
    site: String,

    /// Login or username on that site
    #[arg(default_value = "")]
    login: String,

    #[arg(short = 'L', long, default_value_t = 16)]
    length: usize,

    #[arg(short, long)]
    lowercase: bool,

    #[arg(short, long)]
    uppercase: bool,

    #[arg(short = 'd', long)]
    numbers: bool,

    #[arg(short, long)]
    symbols: bool,

    /// Bump to rotate the password without changing site or login
    #[arg(short, long, default_value_t = 1)]
    counter: u32,

    #[arg(long, default_value_t = StretchConfig::V2.iterations)]
    iterations: u32,

    #[arg(long, default_value_t = StretchConfig::V2.key_length_bytes)]
    key_length: usize,

    /// PBKDF2 variant, e.g. PBKDF2-HMAC-SHA256 or PBKDF2WithHmacSHA512
    #[arg(long, default_value = "PBKDF2-HMAC-SHA256")]
    digest: StretchFunction,

    /// Print only the password
    #[arg(short, long)]
    quiet: bool,

    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn class_flags(&self) -> ClassFlags {
        let switches = [
            (self.lowercase, ClassFlags::LOWERCASE),
            (self.uppercase, ClassFlags::UPPERCASE),
            (self.numbers, ClassFlags::NUMERIC),
            (self.symbols, ClassFlags::SYMBOLS),
        ];

        let flags = switches
            .into_iter()
            .filter(|(on, _)| *on)
            .fold(ClassFlags::NONE, |acc, (_, flag)| acc | flag);

        if flags.is_empty() {
            ClassFlags::ALL
        } else {
            flags
        }
    }

    fn profile(&self) -> Profile {
        Profile::new(self.length, self.class_flags())
            .with_counter(self.counter)
            .with_iterations(self.iterations)
            .with_key_length(self.key_length)
            .with_stretch(self.digest)
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let profile = cli.profile();
    profile.validate().context("Invalid password profile")?;

    let options = ui::DisplayOptions {
        unicode_support: ui::detect_unicode_support(),
        color_support: ui::detect_color_support(),
        quiet: cli.quiet,
    };

    ui::confirm_control_characters(&cli.site, "Site")?;
    ui::confirm_control_characters(&cli.login, "Login")?;

    let master_secret = ui::prompt_master_secret()?;

    let (password, elapsed) = ui::show_progress(options.unicode_support, || {
        lesspass::derive(&cli.site, &cli.login, &master_secret, &profile)
            .context("Failed to derive password")
    })?;

    ui::display_output(&password, &profile, elapsed, &options);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_select_all_classes() {
        let cli = Cli::parse_from(["lesspass", "example.org", "contact@example.org"]);
        assert_eq!(cli.class_flags(), ClassFlags::ALL);
        assert_eq!(cli.profile(), Profile::new(16, ClassFlags::ALL));
    }

    #[test]
    fn test_class_switches() {
        let cli = Cli::parse_from(["lesspass", "example.org", "-l", "-d"]);
        assert_eq!(cli.class_flags(), ClassFlags::LOWERCASE | ClassFlags::NUMERIC);
        assert_eq!(cli.login, "");
    }

    #[test]
    fn test_profile_overrides() {
        let cli = Cli::parse_from([
            "lesspass",
            "example.org",
            "me",
            "--length",
            "24",
            "--counter",
            "3",
            "--iterations",
            "5000",
            "--key-length",
            "64",
            "--digest",
            "PBKDF2WithHmacSHA512",
        ]);

        let profile = cli.profile();
        assert_eq!(profile.length, 24);
        assert_eq!(profile.counter, 3);
        assert_eq!(profile.iterations, 5000);
        assert_eq!(profile.key_length_bytes, 64);
        assert_eq!(profile.stretch, StretchFunction::Pbkdf2HmacSha512);
    }

    #[test]
    fn test_unknown_digest_rejected() {
        let result = Cli::try_parse_from(["lesspass", "example.org", "--digest", "md5"]);
        assert!(result.is_err());
    }
}
