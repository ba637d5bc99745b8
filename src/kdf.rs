use crate::error::Result;
use crate::profile::{Profile, StretchFunction};
use log::{debug, trace};
use pbkdf2::pbkdf2_hmac;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};
use zeroize::Zeroizing;

pub fn salt(site: &str, login: &str, counter: u32) -> Vec<u8> {
    format!("{}{}{:x}", site, login, counter).into_bytes()
}

pub fn derive_entropy(
    site: &str,
    login: &str,
    master_secret: &str,
    profile: &Profile,
) -> Result<Zeroizing<Vec<u8>>> {
    profile.validate()?;

    let salt = Zeroizing::new(salt(site, login, profile.counter));
    let mut entropy = Zeroizing::new(vec![0u8; profile.key_length_bytes]);

    debug!(
        "Stretching with {} ({} iterations, {} bytes)",
        profile.stretch, profile.iterations, profile.key_length_bytes
    );

    stretch(
        profile.stretch,
        master_secret.as_bytes(),
        &salt,
        profile.iterations,
        &mut entropy,
    );

    trace!("Stretch complete");

    Ok(entropy)
}

fn stretch(
    function: StretchFunction,
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    output: &mut [u8],
) {
    match function {
        StretchFunction::Pbkdf2HmacSha1 => {
            pbkdf2_hmac::<Sha1>(password, salt, iterations, output)
        }
        StretchFunction::Pbkdf2HmacSha224 => {
            pbkdf2_hmac::<Sha224>(password, salt, iterations, output)
        }
        StretchFunction::Pbkdf2HmacSha256 => {
            pbkdf2_hmac::<Sha256>(password, salt, iterations, output)
        }
        StretchFunction::Pbkdf2HmacSha384 => {
            pbkdf2_hmac::<Sha384>(password, salt, iterations, output)
        }
        StretchFunction::Pbkdf2HmacSha512 => {
            pbkdf2_hmac::<Sha512>(password, salt, iterations, output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::ClassFlags;
    use crate::error::ConfigurationError;

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    fn fast_profile() -> Profile {
        Profile::new(16, ClassFlags::ALL).with_iterations(1_000)
    }

    #[test]
    fn test_salt_construction() {
        assert_eq!(
            salt("example.org", "contact@example.org", 1),
            b"example.orgcontact@example.org1".to_vec()
        );
        assert_eq!(salt("a", "b", 10), b"aba".to_vec());
        assert_eq!(salt("a", "b", 255), b"abff".to_vec());
        assert_eq!(salt("a", "b", 4096), b"ab1000".to_vec());
        assert_eq!(salt("", "", 1), b"1".to_vec());
    }

    #[test]
    fn test_rfc7914_vector() {
        let mut output = [0u8; 64];
        stretch(StretchFunction::Pbkdf2HmacSha256, b"passwd", b"salt", 1, &mut output);
        assert_eq!(
            hex(&output),
            "55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc\
             49ca9cccf179b645991664b39d77ef317c71b845b1e30bd509112041d3a19783"
        );
    }

    #[test]
    fn test_rfc6070_sha1_vectors() {
        let mut output = [0u8; 20];
        stretch(StretchFunction::Pbkdf2HmacSha1, b"password", b"salt", 1, &mut output);
        assert_eq!(hex(&output), "0c60c80f961f0e71f3a9b524af6012062fe037a6");

        stretch(StretchFunction::Pbkdf2HmacSha1, b"password", b"salt", 4096, &mut output);
        assert_eq!(hex(&output), "4b007901b765489abead49d926f721d065a429c1");
    }

    #[test]
    fn test_sha1_profile_from_jca_name() {
        let function = "PBKDF2WithHmacSHA1".parse::<StretchFunction>().unwrap();
        let profile = fast_profile().with_stretch(function);
        let entropy = derive_entropy("site", "login", "secret", &profile).unwrap();
        assert_eq!(entropy.len(), 32);
    }

    #[test]
    fn test_oversized_key_rejected() {
        let profile = fast_profile().with_key_length(usize::MAX);
        assert!(matches!(
            derive_entropy("site", "login", "secret", &profile),
            Err(ConfigurationError::KeyLengthTooLong { .. })
        ));
    }

    #[test]
    fn test_regression_default_entropy() {
        let profile = Profile::new(16, ClassFlags::ALL);
        let entropy =
            derive_entropy("example.org", "contact@example.org", "password", &profile).unwrap();

        assert_eq!(
            hex(&entropy),
            "dc33d431bce2b01182c613382483ccdb0e2f66482cbba5e9d07dab34acc7eb1e"
        );
    }

    #[test]
    fn test_deterministic_derivation() {
        let profile = fast_profile();
        let e1 = derive_entropy("site", "login", "secret", &profile).unwrap();
        let e2 = derive_entropy("site", "login", "secret", &profile).unwrap();
        assert_eq!(e1.as_slice(), e2.as_slice());
    }

    #[test]
    fn test_output_length() {
        for len in [1, 16, 32, 64, 100] {
            let profile = fast_profile().with_key_length(len);
            let entropy = derive_entropy("site", "login", "secret", &profile).unwrap();
            assert_eq!(entropy.len(), len);
        }
    }

    #[test]
    fn test_counter_changes_entropy() {
        let e1 = derive_entropy("site", "login", "secret", &fast_profile()).unwrap();
        let e2 =
            derive_entropy("site", "login", "secret", &fast_profile().with_counter(2)).unwrap();
        assert_ne!(e1.as_slice(), e2.as_slice());
    }

    #[test]
    fn test_stretch_functions_differ() {
        let functions = [
            StretchFunction::Pbkdf2HmacSha1,
            StretchFunction::Pbkdf2HmacSha224,
            StretchFunction::Pbkdf2HmacSha256,
            StretchFunction::Pbkdf2HmacSha384,
            StretchFunction::Pbkdf2HmacSha512,
        ];

        let outputs: Vec<Vec<u8>> = functions
            .iter()
            .map(|f| {
                derive_entropy("site", "login", "secret", &fast_profile().with_stretch(*f))
                    .unwrap()
                    .to_vec()
            })
            .collect();

        for i in 0..outputs.len() {
            for j in (i + 1)..outputs.len() {
                assert_ne!(outputs[i], outputs[j]);
            }
        }
    }

    #[test]
    fn test_invalid_profile_rejected() {
        let profile = fast_profile().with_iterations(0);
        assert_eq!(
            derive_entropy("site", "login", "secret", &profile).unwrap_err(),
            ConfigurationError::ZeroIterations
        );
    }

    #[test]
    fn test_unicode_inputs_used_verbatim() {
        let profile = fast_profile();
        let nfc = derive_entropy("café", "login", "secret", &profile).unwrap();
        let nfd = derive_entropy("cafe\u{0301}", "login", "secret", &profile).unwrap();
        assert_ne!(nfc.as_slice(), nfd.as_slice());
    }
}
