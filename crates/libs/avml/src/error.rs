use crate::capability::Isa;

/// Errors raised at the interop boundaries of the kernel.
///
/// Numeric edge cases (normalizing a zero vector, inverting a singular
/// matrix) are never reported here; they produce IEEE special values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The source slice holds fewer scalars than the aggregate needs.
    #[error("expected at least {expected} scalars, got {actual}")]
    SliceTooShort {
        /// Number of scalars the aggregate is made of.
        expected: usize,
        /// Length of the source slice.
        actual: usize,
    },
    /// The source is not aligned to the alignment of the aggregate.
    #[error("address {address:#x} is not aligned to {alignment} bytes")]
    Misaligned {
        /// Address of the first scalar.
        address: usize,
        /// Required alignment in bytes.
        alignment: usize,
    },
    /// The kernel was built for an instruction set the host lacks.
    #[error("the kernel was built for `{0}`, which this processor does not support")]
    UnsupportedIsa(Isa),
}

/// Checks that `slice` holds at least `expected` scalars.
pub(crate) fn check_len<T>(slice: &[T], expected: usize) -> Result<(), Error> {
    if slice.len() < expected {
        return Err(Error::SliceTooShort {
            expected,
            actual: slice.len(),
        });
    }
    Ok(())
}

/// Checks that `slice` starts at an address aligned to `alignment`.
pub(crate) fn check_alignment<T>(slice: &[T], alignment: usize) -> Result<(), Error> {
    let address = slice.as_ptr() as usize;
    if address % alignment != 0 {
        return Err(Error::Misaligned { address, alignment });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let err = Error::SliceTooShort {
            expected: 3,
            actual: 2,
        };
        assert_eq!(err.to_string(), "expected at least 3 scalars, got 2");
        let err = Error::Misaligned {
            address: 0x1004,
            alignment: 16,
        };
        assert_eq!(err.to_string(), "address 0x1004 is not aligned to 16 bytes");
        assert_eq!(
            Error::UnsupportedIsa(Isa::Avx2).to_string(),
            "the kernel was built for `avx2`, which this processor does not support"
        );
    }

    #[test]
    fn slice_checks() {
        let data = [1.0f32; 4];
        assert!(check_len(&data, 4).is_ok());
        assert_eq!(
            check_len(&data[..1], 2),
            Err(Error::SliceTooShort {
                expected: 2,
                actual: 1
            })
        );
        assert!(check_alignment(&data, 4).is_ok());
    }
}
