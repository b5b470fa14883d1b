//! Elliptic curve points and their SEC1 octet string form.

use crate::{EcdsaCurve, Error, Mpint, Result};
use p256::elliptic_curve::sec1::ToEncodedPoint;

/// SEC1 point compression indicator.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[repr(u8)]
pub enum PointCompression {
    /// Compressed point with even `y` coordinate.
    CompressedEvenY = 0x02,

    /// Compressed point with odd `y` coordinate.
    CompressedOddY = 0x03,

    /// Uncompressed point: both coordinates present.
    Uncompressed = 0x04,
}

impl PointCompression {
    /// Look up the compression scheme for an indicator byte.
    pub fn from_indicator(indicator: u8) -> Option<Self> {
        match indicator {
            0x02 => Some(PointCompression::CompressedEvenY),
            0x03 => Some(PointCompression::CompressedOddY),
            0x04 => Some(PointCompression::Uncompressed),
            _ => None,
        }
    }

    /// Raw indicator byte.
    pub fn indicator(self) -> u8 {
        self as u8
    }

    /// Is this a compressed form?
    pub fn is_compressed(self) -> bool {
        self != PointCompression::Uncompressed
    }
}

/// Affine elliptic curve point with non-negative coordinates.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EcPoint {
    x: Mpint,
    y: Mpint,
}

impl EcPoint {
    /// Create a point from its affine coordinates.
    pub fn new(x: Mpint, y: Mpint) -> Self {
        Self { x, y }
    }

    /// Affine `x` coordinate.
    pub fn x(&self) -> &Mpint {
        &self.x
    }

    /// Affine `y` coordinate.
    pub fn y(&self) -> &Mpint {
        &self.y
    }

    /// Parse a point from a SEC1 octet string.
    ///
    /// Leading zero octets before the compression indicator are skipped.
    /// Uncompressed points are split into two equal-length big endian
    /// coordinates. Compressed points have their `y` coordinate recovered
    /// from the curve equation, which requires knowing the `curve`.
    ///
    /// # Errors
    /// - [`Error::InvalidPoint`] if `octets` is empty, all zeroes, or a
    ///   compressed `x` coordinate isn't on the curve.
    /// - [`Error::MalformedPoint`] if uncompressed coordinates have odd total
    ///   length, or are wider than the field size of `curve`.
    /// - [`Error::CompressionUnsupported`] for unknown indicators, or
    ///   compressed points when `curve` is `None`.
    pub fn from_octet_string(octets: &[u8], curve: Option<EcdsaCurve>) -> Result<Self> {
        let start = octets
            .iter()
            .position(|&byte| byte != 0)
            .ok_or(Error::InvalidPoint)?;

        let indicator = octets[start];
        let coordinates = &octets[(start + 1)..];

        match PointCompression::from_indicator(indicator) {
            Some(PointCompression::Uncompressed) => {
                let oversized =
                    curve.is_some_and(|curve| coordinates.len() > 2 * curve.field_size());
                if coordinates.len() % 2 != 0 || oversized {
                    return Err(Error::MalformedPoint {
                        len: coordinates.len(),
                    });
                }

                let (x, y) = coordinates.split_at(coordinates.len() / 2);
                Ok(Self::new(
                    Mpint::from_positive_bytes(x),
                    Mpint::from_positive_bytes(y),
                ))
            }
            Some(_) => match curve {
                Some(curve) => decompress(curve, indicator, coordinates),
                None => Err(Error::CompressionUnsupported { indicator }),
            },
            None => Err(Error::CompressionUnsupported { indicator }),
        }
    }

    /// Serialize as an uncompressed SEC1 octet string with both coordinates
    /// left-padded to the curve's field size.
    pub fn to_octet_string(&self, curve: EcdsaCurve) -> Result<Vec<u8>> {
        Ok(self.sec1_octets(curve)?)
    }

    pub(crate) fn sec1_octets(&self, curve: EcdsaCurve) -> encoding::Result<Vec<u8>> {
        let field_size = curve.field_size();
        let mut octets = Vec::with_capacity(1 + 2 * field_size);
        octets.push(PointCompression::Uncompressed.indicator());
        octets.extend_from_slice(&self.x.to_padded_bytes(field_size)?);
        octets.extend_from_slice(&self.y.to_padded_bytes(field_size)?);
        Ok(octets)
    }
}

/// Recover the `y` coordinate of a compressed point on `curve`.
fn decompress(curve: EcdsaCurve, indicator: u8, x: &[u8]) -> Result<EcPoint> {
    let x = Mpint::from_positive_bytes(x)
        .to_padded_bytes(curve.field_size())
        .map_err(|_| Error::InvalidPoint)?;

    let mut sec1 = Vec::with_capacity(1 + x.len());
    sec1.push(indicator);
    sec1.extend_from_slice(&x);

    macro_rules! recover {
        ($curve:ident) => {{
            let point = $curve::PublicKey::from_sec1_bytes(&sec1)
                .map_err(|_| Error::InvalidPoint)?
                .to_encoded_point(false);

            match (point.x(), point.y()) {
                (Some(x), Some(y)) => Ok(EcPoint::new(
                    Mpint::from_positive_bytes(x),
                    Mpint::from_positive_bytes(y),
                )),
                _ => Err(Error::InvalidPoint),
            }
        }};
    }

    match curve {
        EcdsaCurve::NistP256 => recover!(p256),
        EcdsaCurve::NistP384 => recover!(p384),
        EcdsaCurve::NistP521 => recover!(p521),
    }
}

#[cfg(test)]
mod tests {
    use super::{EcPoint, PointCompression};
    use crate::{EcdsaCurve, Error};
    use hex_literal::hex;

    #[test]
    fn uncompressed() {
        let point = EcPoint::from_octet_string(&hex!("04 0102 0304"), None).unwrap();
        assert_eq!(point.x().as_positive_bytes(), hex!("0102"));
        assert_eq!(point.y().as_positive_bytes(), hex!("0304"));
    }

    #[test]
    fn leading_zeroes_skipped() {
        let point = EcPoint::from_octet_string(&hex!("00 00 04 aa bb"), None).unwrap();
        assert_eq!(point.x().as_positive_bytes(), hex!("aa"));
        assert_eq!(point.y().as_positive_bytes(), hex!("bb"));
    }

    #[test]
    fn reject_empty() {
        assert_eq!(
            EcPoint::from_octet_string(&[], None).err(),
            Some(Error::InvalidPoint)
        );
    }

    #[test]
    fn reject_all_zeroes() {
        assert_eq!(
            EcPoint::from_octet_string(&[0u8; 65], Some(EcdsaCurve::NistP256)).err(),
            Some(Error::InvalidPoint)
        );
    }

    #[test]
    fn reject_coordinates_wider_than_field() {
        let mut octets = vec![0x04];
        octets.extend_from_slice(&[0x11; 66]);

        assert_eq!(
            EcPoint::from_octet_string(&octets, Some(EcdsaCurve::NistP256)).err(),
            Some(Error::MalformedPoint { len: 66 })
        );
        assert!(EcPoint::from_octet_string(&octets, Some(EcdsaCurve::NistP384)).is_ok());
    }

    #[test]
    fn reject_odd_coordinates() {
        assert_eq!(
            EcPoint::from_octet_string(&hex!("04 010203"), None).err(),
            Some(Error::MalformedPoint { len: 3 })
        );
    }

    #[test]
    fn reject_unknown_indicator() {
        assert_eq!(
            EcPoint::from_octet_string(&hex!("05 0102"), None).err(),
            Some(Error::CompressionUnsupported { indicator: 0x05 })
        );
    }

    #[test]
    fn compressed_requires_curve() {
        assert_eq!(
            EcPoint::from_octet_string(&hex!("03 0102"), None).err(),
            Some(Error::CompressionUnsupported { indicator: 0x03 })
        );
    }

    #[test]
    fn indicators() {
        assert_eq!(
            PointCompression::from_indicator(0x02),
            Some(PointCompression::CompressedEvenY)
        );
        assert!(PointCompression::CompressedOddY.is_compressed());
        assert_eq!(PointCompression::Uncompressed.indicator(), 0x04);
        assert_eq!(PointCompression::from_indicator(0x00), None);
    }

    #[test]
    fn octet_string_is_padded() {
        let point = EcPoint::new(0x01u32.into(), 0x02u32.into());
        let octets = point.to_octet_string(EcdsaCurve::NistP256).unwrap();
        assert_eq!(octets.len(), 65);
        assert_eq!(octets[0], 0x04);
        assert_eq!(octets[32], 0x01);
        assert_eq!(octets[64], 0x02);
    }
}
