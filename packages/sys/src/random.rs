use rand::Rng;

use crate::error::{Result, SysError};

/// The largest modulus a byte can represent uniformly.
pub const MAX_MODULUS: u32 = 256;

/// `size` random bytes, each uniform in `0..modulus`.
///
/// `modulus` must be in `1..=256`.
pub fn random_bytes(size: usize, modulus: u32) -> Result<Vec<u8>> {
    if size == 0 {
        return Err(SysError::invalid("random buffer of zero bytes"));
    }
    if modulus == 0 || modulus > MAX_MODULUS {
        return Err(SysError::invalid(format!(
            "random modulus {modulus} outside 1..={MAX_MODULUS}"
        )));
    }
    let mut rng = rand::thread_rng();
    Ok((0..size)
        .map(|_| rng.gen_range(0..modulus) as u8)
        .collect())
}
