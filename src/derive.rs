use crate::error::Result;
use crate::generator::render_password;
use crate::kdf::derive_entropy;
use crate::profile::Profile;
use log::debug;
use zeroize::Zeroizing;

pub fn derive(
    site: &str,
    login: &str,
    master_secret: &str,
    profile: &Profile,
) -> Result<Zeroizing<String>> {
    profile.validate()?;

    debug!(
        "Deriving {}-char password over {} ({} classes, counter {})",
        profile.length,
        profile.class_flags,
        profile.class_count(),
        profile.counter
    );

    let entropy = derive_entropy(site, login, master_secret, profile)?;
    render_password(&entropy, profile.class_flags, profile.length)
}
