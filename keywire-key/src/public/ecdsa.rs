//! Elliptic Curve Digital Signature Algorithm (ECDSA) public keys.

use crate::{Algorithm, EcPoint, EcdsaCurve, Error, Result};
use core::hash::{Hash, Hasher};
use encoding::{CheckedSum, Decode, Encode, Writer};
use p256::elliptic_curve::sec1::ToEncodedPoint;

/// Elliptic Curve Digital Signature Algorithm (ECDSA) public key.
///
/// Wire layout after the key type is `string curve-name` followed by the
/// curve point as a SEC1 octet `string`. The curve name must match the one
/// embedded in the key type.
///
/// Described in [RFC5656 § 3.1](https://datatracker.ietf.org/doc/html/rfc5656#section-3.1).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EcdsaPublicKey {
    curve: EcdsaCurve,
    point: EcPoint,
}

impl EcdsaPublicKey {
    /// Create a new public key from a curve and a point on it.
    pub fn new(curve: EcdsaCurve, point: EcPoint) -> Self {
        Self { curve, point }
    }

    /// Parse a public key from a SEC1 octet string on the given curve.
    ///
    /// Compressed points are expanded using the curve equation.
    pub fn from_sec1_bytes(curve: EcdsaCurve, octets: &[u8]) -> Result<Self> {
        Ok(Self::new(curve, EcPoint::from_octet_string(octets, Some(curve))?))
    }

    /// Serialize the point as an uncompressed SEC1 octet string.
    pub fn to_sec1_bytes(&self) -> Result<Vec<u8>> {
        self.point.to_octet_string(self.curve)
    }

    /// Get the [`Algorithm`] for this public key type.
    pub fn algorithm(&self) -> Algorithm {
        Algorithm::Ecdsa { curve: self.curve }
    }

    /// Get the [`EcdsaCurve`] for this key.
    pub fn curve(&self) -> EcdsaCurve {
        self.curve
    }

    /// Get the public curve point.
    pub fn point(&self) -> &EcPoint {
        &self.point
    }

    /// Decode the key body for the curve named by the key type.
    ///
    /// # Returns
    /// - `Err(Error::CurveMismatch)` if the encoded curve name differs.
    pub(crate) fn decode_as(reader: &mut impl encoding::Reader, curve: EcdsaCurve) -> Result<Self> {
        let curve_name = String::decode(reader)?;

        if curve_name != curve.as_str() {
            return Err(Error::CurveMismatch {
                expected: curve.as_str().into(),
                actual: curve_name,
            });
        }

        let octets = Vec::<u8>::decode(reader)?;
        Self::from_sec1_bytes(curve, &octets)
    }
}

impl Encode for EcdsaPublicKey {
    fn encoded_len(&self) -> encoding::Result<usize> {
        [
            self.curve.encoded_len()?,
            4,
            1 + 2 * self.curve.field_size(),
        ]
        .checked_sum()
    }

    fn encode(&self, writer: &mut impl Writer) -> encoding::Result<()> {
        self.curve.encode(writer)?;
        self.point.sec1_octets(self.curve)?.encode(writer)
    }
}

impl Hash for EcdsaPublicKey {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.curve.hash(state);
        self.point.x().as_positive_bytes().hash(state);
        self.point.y().as_positive_bytes().hash(state);
    }
}

macro_rules! impl_native_conversions {
    ($native:ident, $curve:expr) => {
        impl TryFrom<&EcdsaPublicKey> for $native::PublicKey {
            type Error = Error;

            fn try_from(key: &EcdsaPublicKey) -> Result<$native::PublicKey> {
                if key.curve != $curve {
                    return Err(Error::CurveMismatch {
                        expected: $curve.as_str().into(),
                        actual: key.curve.as_str().into(),
                    });
                }

                $native::PublicKey::from_sec1_bytes(&key.to_sec1_bytes()?)
                    .map_err(|_| Error::rejected(key.algorithm(), "point is not on the curve"))
            }
        }

        impl TryFrom<&$native::PublicKey> for EcdsaPublicKey {
            type Error = Error;

            fn try_from(key: &$native::PublicKey) -> Result<EcdsaPublicKey> {
                EcdsaPublicKey::from_sec1_bytes($curve, key.to_encoded_point(false).as_bytes())
            }
        }

        impl TryFrom<$native::PublicKey> for EcdsaPublicKey {
            type Error = Error;

            fn try_from(key: $native::PublicKey) -> Result<EcdsaPublicKey> {
                EcdsaPublicKey::try_from(&key)
            }
        }
    };
}

impl_native_conversions!(p256, EcdsaCurve::NistP256);
impl_native_conversions!(p384, EcdsaCurve::NistP384);
impl_native_conversions!(p521, EcdsaCurve::NistP521);

#[cfg(test)]
mod tests {
    use super::EcdsaPublicKey;
    use crate::{EcdsaCurve, Error};
    use encoding::Encode;
    use hex_literal::hex;

    #[test]
    fn curve_name_must_match_key_type() {
        let mut body = Vec::new();
        EcdsaCurve::NistP384.encode(&mut body).unwrap();
        hex!("04 0102").encode(&mut body).unwrap();

        assert_eq!(
            EcdsaPublicKey::decode_as(&mut body.as_slice(), EcdsaCurve::NistP256).err(),
            Some(Error::CurveMismatch {
                expected: "nistp256".into(),
                actual: "nistp384".into(),
            })
        );
    }

    #[test]
    fn native_rejects_other_curve() {
        let key = EcdsaPublicKey::from_sec1_bytes(EcdsaCurve::NistP384, &hex!("04 01 02")).unwrap();
        assert!(matches!(
            p256::PublicKey::try_from(&key),
            Err(Error::CurveMismatch { .. })
        ));
    }
}
