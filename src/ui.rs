use anyhow::{Context, Result};
use console::{Style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use lesspass::charset::combined_alphabet;
use lesspass::Profile;
use rpassword::read_password;
use std::io::{self, Write};
use std::time::{Duration, Instant};
use zeroize::Zeroizing;

pub const STRONG_ENTROPY: f64 = 100.0;
pub const MIN_SAFE_ENTROPY: f64 = 64.0;

pub const MIN_SAFE_ITERATIONS: u32 = 100_000;
pub const MIN_SAFE_PASSWORD_LENGTH: usize = 12;

pub const MAX_MASTER_BYTES: usize = 1024 * 1024;

pub struct DisplayOptions {
    pub unicode_support: bool,
    pub color_support: bool,
    pub quiet: bool,
}

pub fn detect_unicode_support() -> bool {
    supports_unicode::on(supports_unicode::Stream::Stdout)
}

pub fn detect_color_support() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

pub fn get_status_symbols(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("✓", "!")
    } else {
        ("+", "!")
    }
}

fn tree_branches(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("├─", "└─")
    } else {
        ("|-", "`-")
    }
}

fn status_style(secure: bool, options: &DisplayOptions) -> Style {
    if !options.color_support {
        Style::new()
    } else if secure {
        Style::new().green()
    } else {
        Style::new().yellow()
    }
}

pub fn estimate_entropy(profile: &Profile) -> f64 {
    let alphabet_size = combined_alphabet(profile.class_flags).len();
    if alphabet_size == 0 {
        return 0.0;
    }
    let rendered = profile.length as f64 * (alphabet_size as f64).log2();
    rendered.min(profile.key_length_bytes as f64 * 8.0)
}

fn control_character_positions(s: &str) -> Vec<usize> {
    s.chars()
        .enumerate()
        .filter(|(_, c)| c.is_control())
        .map(|(pos, _)| pos)
        .collect()
}

pub fn confirm_control_characters(s: &str, input_name: &str) -> Result<()> {
    let positions = control_character_positions(s);
    if positions.is_empty() {
        return Ok(());
    }

    let term = Term::stderr();

    let warning_msg = format!(
        "WARNING: {} contains {} control character(s) at position(s): {}",
        input_name,
        positions.len(),
        positions
            .iter()
            .map(|pos| pos.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    term.write_line(&warning_msg)?;
    term.write_str("Continue anyway? [y/N]: ")?;
    term.flush()?;

    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    let response = response.trim().to_lowercase();

    term.clear_last_lines(2)?;

    if response != "y" && response != "yes" {
        anyhow::bail!("Aborted");
    }

    Ok(())
}

pub fn prompt_master_secret() -> Result<Zeroizing<String>> {
    print!("Master password: ");
    io::stdout().flush()?;

    let password = Zeroizing::new(read_password().context("Failed to fetch master password")?);

    if password.is_empty() {
        anyhow::bail!("Master password cannot be empty");
    }

    if password.len() > MAX_MASTER_BYTES {
        anyhow::bail!(
            "Master password too long ({} bytes, maximum is {})",
            password.len(),
            MAX_MASTER_BYTES
        );
    }

    confirm_control_characters(&password, "Master password")?;

    Ok(password)
}

pub fn show_progress<F, T>(unicode_support: bool, f: F) -> Result<(T, Duration)>
where
    F: FnOnce() -> Result<T>,
{
    let term = Term::stdout();
    term.hide_cursor().ok();

    let pb = ProgressBar::new_spinner();

    if unicode_support {
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
    } else {
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("-\\|/-"),
        );
    }

    pb.set_message("Stretching master password...");
    pb.enable_steady_tick(Duration::from_millis(80));

    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed();

    pb.finish_and_clear();
    term.show_cursor().ok();

    result.map(|r| (r, elapsed))
}

pub fn display_output(
    password: &Zeroizing<String>,
    profile: &Profile,
    elapsed: Duration,
    options: &DisplayOptions,
) {
    if options.quiet {
        println!("{}", &**password);
        return;
    }

    println!("\n{}\n", &**password);
    display_settings(profile, options);
    display_stats(profile, elapsed, options);
}

fn display_settings(profile: &Profile, options: &DisplayOptions) {
    let (check_ok, check_warn) = get_status_symbols(options.unicode_support);
    let (branch, last) = tree_branches(options.unicode_support);

    let stretch_secure = profile.iterations >= MIN_SAFE_ITERATIONS;
    let stretch_style = status_style(stretch_secure, options);
    let stretch_status = if stretch_secure { check_ok } else { check_warn };

    println!("Settings:");

    println!(
        "  {} Stretch    {} {} (i={}, {} bytes)",
        branch,
        stretch_style.apply_to(format!("[{}]", stretch_status)),
        profile.stretch,
        stretch_style.apply_to(profile.iterations),
        profile.key_length_bytes
    );
    println!("  {} Version    {}", branch, profile.version);
    println!("  {} Counter    {}", branch, profile.counter);
    println!(
        "  {} Classes    {} ({})",
        last,
        profile.class_count(),
        profile.class_flags
    );

    println!();
}

fn display_stats(profile: &Profile, elapsed: Duration, options: &DisplayOptions) {
    let (check_ok, check_warn) = get_status_symbols(options.unicode_support);
    let (branch, last) = tree_branches(options.unicode_support);

    let entropy = estimate_entropy(profile);
    let (status_icon, entropy_style, status_text) = if entropy >= STRONG_ENTROPY {
        (check_ok, status_style(true, options), "Strong")
    } else if entropy >= MIN_SAFE_ENTROPY {
        (check_ok, status_style(true, options), "Fair")
    } else {
        (check_warn, status_style(false, options), "Weak")
    };

    let length_secure = profile.length >= MIN_SAFE_PASSWORD_LENGTH;
    let length_style = status_style(length_secure, options);
    let length_status = if length_secure { check_ok } else { check_warn };

    println!("Stats:");

    println!(
        "  {} Entropy    {} {} bits ({})",
        branch,
        entropy_style.apply_to(format!("[{}]", status_icon)),
        entropy_style.apply_to(format!("{:.1}", entropy)),
        entropy_style.apply_to(status_text)
    );
    println!(
        "  {} Length     {} {} {}",
        branch,
        length_style.apply_to(format!("[{}]", length_status)),
        length_style.apply_to(profile.length),
        if profile.length == 1 { "char" } else { "chars" }
    );
    println!(
        "  {} Charset    {} chars",
        branch,
        combined_alphabet(profile.class_flags).len()
    );
    println!("  {} Time       {:.1}s", last, elapsed.as_secs_f64());
}
