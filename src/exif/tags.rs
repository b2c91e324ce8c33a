//! The standard tag catalog, see
//! https://exiftool.org/TagNames/EXIF.html
//!
//! Covers IFD0 and the Exif sub-IFD. GPS and interoperability sub-IFD tags
//! reuse the low tag codes of IFD0, so they are left out; their pointers
//! ([`ExifTag::GPSInfo`], [`ExifTag::ExifInteroperabilityOffset`]) are in.

use std::{fmt::Display, str::FromStr};

#[cfg(feature = "json_dump")]
use serde::{Deserialize, Serialize};

macro_rules! exif_tags {
    (
        $(
            $( #[$attr:meta] )*
            ($name:ident, $code:literal)
        ),+ $(,)?
    ) => {
        /// Recognized standard Exif tags. Each variant's discriminant is its
        /// tag code, and its canonical field name is the variant name.
        ///
        /// Tags outside this enum still show up, in the user-defined table,
        /// keyed by their raw code.
        #[cfg_attr(feature = "json_dump", derive(Serialize, Deserialize))]
        #[derive(Debug, Eq, PartialEq, Hash, Clone, Copy)]
        pub enum ExifTag {
            $(
                $( #[$attr] )*
                $name = $code,
            )+
        }

        impl ExifTag {
            /// Every tag of the catalog, in catalog order.
            pub const ALL: &'static [ExifTag] = &[$(ExifTag::$name,)+];

            /// Canonical field name.
            pub const fn name(self) -> &'static str {
                match self {
                    $(ExifTag::$name => stringify!($name),)+
                }
            }
        }

        impl TryFrom<u16> for ExifTag {
            type Error = crate::Error;
            fn try_from(v: u16) -> Result<Self, Self::Error> {
                match v {
                    $($code => Ok(ExifTag::$name),)+
                    o => Err(crate::Error::UnrecognizedTag(o)),
                }
            }
        }
    };
}

exif_tags! {
    // IFD0
    (NewSubfileType, 0x00fe),
    (SubfileType, 0x00ff),
    (ImageWidth, 0x0100),
    (ImageLength, 0x0101),
    (BitsPerSample, 0x0102),
    (Compression, 0x0103),
    (PhotometricInterpretation, 0x0106),
    (ImageDescription, 0x010e),
    (Make, 0x010f),
    (Model, 0x0110),
    (StripOffsets, 0x0111),
    /// Decoded through the orientation lookup table.
    (Orientation, 0x0112),
    (SamplesPerPixel, 0x0115),
    (RowsPerStrip, 0x0116),
    (StripByteCounts, 0x0117),
    (XResolution, 0x011a),
    (YResolution, 0x011b),
    (PlanarConfiguration, 0x011c),
    (ResolutionUnit, 0x0128),
    (TransferFunction, 0x012d),
    (Software, 0x0131),
    /// Date and time of the last file change, `YYYY:MM:DD HH:MM:SS`.
    (DateTime, 0x0132),
    (Artist, 0x013b),
    (HostComputer, 0x013c),
    (WhitePoint, 0x013e),
    (PrimaryChromaticities, 0x013f),
    (JpegIFOffset, 0x0201),
    (JpegIFByteCount, 0x0202),
    (YCbCrCoefficients, 0x0211),
    (YCbCrSubSampling, 0x0212),
    (YCbCrPositioning, 0x0213),
    (ReferenceBlackWhite, 0x0214),
    (XMLPacket, 0x02bc),
    (Rating, 0x4746),
    (RatingPercent, 0x4749),
    (Copyright, 0x8298),

    // sub ifd pointers
    (ExifOffset, 0x8769),
    (GPSInfo, 0x8825),

    // Exif sub ifd
    (ExposureTime, 0x829a),
    (FNumber, 0x829d),
    (ExposureProgram, 0x8822),
    (SpectralSensitivity, 0x8824),
    (ISOSpeedRatings, 0x8827),
    (OECF, 0x8828),
    (SensitivityType, 0x8830),
    (StandardOutputSensitivity, 0x8831),
    (RecommendedExposureIndex, 0x8832),
    (ExifVersion, 0x9000),
    (DateTimeOriginal, 0x9003),
    (DateTimeDigitized, 0x9004),
    (OffsetTime, 0x9010),
    (OffsetTimeOriginal, 0x9011),
    (OffsetTimeDigitized, 0x9012),
    (ComponentsConfiguration, 0x9101),
    (CompressedBitsPerPixel, 0x9102),
    (ShutterSpeedValue, 0x9201),
    (ApertureValue, 0x9202),
    (BrightnessValue, 0x9203),
    (ExposureBiasValue, 0x9204),
    /// Smallest F number of the lens, in APEX units.
    (MaxApertureValue, 0x9205),
    (SubjectDistance, 0x9206),
    (MeteringMode, 0x9207),
    (LightSource, 0x9208),
    (Flash, 0x9209),
    (FocalLength, 0x920a),
    (SubjectArea, 0x9214),
    (MakerNote, 0x927c),
    (UserComment, 0x9286),
    (SubsecTime, 0x9290),
    (SubsecTimeOriginal, 0x9291),
    (SubsecTimeDigitized, 0x9292),
    (FlashPixVersion, 0xa000),
    (ColorSpace, 0xa001),
    (ExifImageWidth, 0xa002),
    (ExifImageHeight, 0xa003),
    (RelatedSoundFile, 0xa004),
    (ExifInteroperabilityOffset, 0xa005),
    (FlashEnergy, 0xa20b),
    (SpatialFrequencyResponse, 0xa20c),
    (FocalPlaneXResolution, 0xa20e),
    (FocalPlaneYResolution, 0xa20f),
    (FocalPlaneResolutionUnit, 0xa210),
    (SubjectLocation, 0xa214),
    (ExposureIndex, 0xa215),
    (SensingMethod, 0xa217),
    (FileSource, 0xa300),
    (SceneType, 0xa301),
    (CFAPattern, 0xa302),
    (CustomRendered, 0xa401),
    (ExposureMode, 0xa402),
    (WhiteBalance, 0xa403),
    (DigitalZoomRatio, 0xa404),
    (FocalLengthIn35mmFilm, 0xa405),
    (SceneCaptureType, 0xa406),
    (GainControl, 0xa407),
    (Contrast, 0xa408),
    (Saturation, 0xa409),
    (Sharpness, 0xa40a),
    (DeviceSettingDescription, 0xa40b),
    (SubjectDistanceRange, 0xa40c),
    (ImageUniqueID, 0xa420),
    (CameraOwnerName, 0xa430),
    (BodySerialNumber, 0xa431),
    (LensSpecification, 0xa432),
    (LensMake, 0xa433),
    (LensModel, 0xa434),
    (LensSerialNumber, 0xa435),
    (Gamma, 0xa500),
    (PrintImageMatching, 0xc4a5),
}

impl ExifTag {
    pub const fn code(self) -> u16 {
        self as u16
    }
}

/// Returns the canonical field name of `code`, if it is a standard tag.
pub fn field_name_for(code: u16) -> Option<&'static str> {
    ExifTag::try_from(code).ok().map(ExifTag::name)
}

impl Display for ExifTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<ExifTag> for &str {
    fn from(value: ExifTag) -> Self {
        value.name()
    }
}

impl From<ExifTag> for u16 {
    fn from(value: ExifTag) -> Self {
        value.code()
    }
}

impl FromStr for ExifTag {
    type Err = crate::Error;

    /// Look a tag up by its canonical field name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExifTag::ALL
            .iter()
            .find(|t| t.name() == s)
            .copied()
            .ok_or_else(|| format!("unknown exif field name: {s}").into())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use test_case::test_case;

    use super::*;

    #[test]
    fn catalog_is_consistent() {
        let codes: HashSet<u16> = ExifTag::ALL.iter().map(|t| t.code()).collect();
        let names: HashSet<&str> = ExifTag::ALL.iter().map(|t| t.name()).collect();
        assert_eq!(codes.len(), ExifTag::ALL.len());
        assert_eq!(names.len(), ExifTag::ALL.len());

        for tag in ExifTag::ALL {
            assert_eq!(ExifTag::try_from(tag.code()).unwrap(), *tag);
            assert_eq!(tag.name().parse::<ExifTag>().unwrap(), *tag);
        }
    }

    #[test_case(0x0132, Some("DateTime"))]
    #[test_case(0x9003, Some("DateTimeOriginal"))]
    #[test_case(0x9004, Some("DateTimeDigitized"))]
    #[test_case(0x829d, Some("FNumber"))]
    #[test_case(0x9205, Some("MaxApertureValue"))]
    #[test_case(0x920a, Some("FocalLength"))]
    #[test_case(0xa405, Some("FocalLengthIn35mmFilm"))]
    #[test_case(0x0112, Some("Orientation"))]
    #[test_case(0x0128, Some("ResolutionUnit"))]
    #[test_case(0x8822, Some("ExposureProgram"))]
    #[test_case(0x9207, Some("MeteringMode"))]
    #[test_case(0x011a, Some("XResolution"))]
    #[test_case(0x011b, Some("YResolution"))]
    #[test_case(0x829a, Some("ExposureTime"))]
    #[test_case(0x9204, Some("ExposureBiasValue"))]
    #[test_case(0xea1d, None)]
    #[test_case(0x0001, None)]
    fn field_names(code: u16, name: Option<&str>) {
        assert_eq!(field_name_for(code), name);
    }

    #[test]
    fn unknown_name() {
        assert!("Aperture".parse::<ExifTag>().is_err());
        assert!(matches!(
            ExifTag::try_from(0xea1c),
            Err(crate::Error::UnrecognizedTag(0xea1c))
        ));
    }
}
