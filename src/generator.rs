use crate::charset::{self, ClassFlags};
use crate::error::{ConfigurationError, Result};
use crate::profile::MAX_PASSWORD_LENGTH;
use log::trace;
use num_bigint::BigUint;
use num_integer::Integer;
use zeroize::Zeroizing;

fn consume_entropy(
    output: &mut Vec<u8>,
    mut quotient: BigUint,
    alphabet: &[u8],
    count: usize,
) -> BigUint {
    let base = BigUint::from(alphabet.len());

    for _ in 0..count {
        let (next, remainder) = quotient.div_rem(&base);
        output.push(alphabet[low_u32(&remainder) as usize]);
        quotient = next;
    }

    quotient
}

fn low_u32(value: &BigUint) -> u32 {
    value.iter_u32_digits().next().unwrap_or(0)
}

// Every class is rendered from the same narrowed quotient, and the caller
// splices from that same value again. Chaining them would change the output.
fn one_char_per_class(entropy: u32, flags: ClassFlags) -> Vec<u8> {
    let mut chars = Vec::with_capacity(flags.len());

    for class in charset::selected(flags) {
        consume_entropy(
            &mut chars,
            BigUint::from(entropy),
            class.alphabet().as_bytes(),
            1,
        );
    }

    chars
}

fn insert_pseudo_randomly(password: &mut Vec<u8>, mut entropy: u32, chars: &[u8]) {
    for &c in chars {
        let len = password.len() as u32;
        entropy /= len;
        let position = (entropy % len) as usize;
        password.insert(position, c);
    }
}

pub fn render_password(
    entropy: &[u8],
    flags: ClassFlags,
    length: usize,
) -> Result<Zeroizing<String>> {
    let classes = flags.len();
    if classes == 0 {
        return Err(ConfigurationError::NoCharacterClass);
    }
    if length <= classes {
        return Err(ConfigurationError::LengthTooShort { length, classes });
    }
    if length > MAX_PASSWORD_LENGTH {
        return Err(ConfigurationError::LengthTooLong {
            length,
            max: MAX_PASSWORD_LENGTH,
        });
    }

    let alphabet = charset::combined_alphabet(flags);
    trace!(
        "Rendering {} chars from a {}-symbol alphabet",
        length,
        alphabet.len()
    );

    let mut password = Zeroizing::new(Vec::with_capacity(length));
    let quotient = consume_entropy(
        &mut password,
        BigUint::from_bytes_be(entropy),
        alphabet.as_bytes(),
        length - classes,
    );

    let narrowed = low_u32(&quotient);
    let mandatory = Zeroizing::new(one_char_per_class(narrowed, flags));
    insert_pseudo_randomly(&mut password, narrowed, &mandatory);

    let rendered: String = password.iter().map(|&b| b as char).collect();
    Ok(Zeroizing::new(rendered))
}
