use std::{fs::File, io::Read, path::Path};

use crate::{ExifTag::*, RawTagMap, RawValue, URational};

pub fn read_sample(path: &str) -> Result<Vec<u8>, std::io::Error> {
    let mut f = open_sample(path)?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    Ok(buf)
}

pub fn open_sample(path: &str) -> Result<File, std::io::Error> {
    File::open(sample_path(path))
}

pub fn sample_path(path: &str) -> std::path::PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        Path::new("./testdata").join(p)
    }
}

/// Date taken, orientation, f-number and horizontal resolution only.
pub fn scenario_raw_map() -> RawTagMap {
    let mut raw = RawTagMap::new();
    raw.insert(DateTimeOriginal.code(), "2021:05:17 14:30:00");
    raw.insert(Orientation.code(), 1_u16);
    raw.insert(FNumber.code(), (56_u32, 10_u32));
    raw.insert(XResolution.code(), (300_u32, 1_u32));
    raw
}

/// What a typical camera JPEG carries, plus a few tags outside the catalog.
pub fn sample_raw_map() -> RawTagMap {
    let lens: Vec<URational> = vec![
        (24, 1).into(),
        (70, 1).into(),
        (28, 10).into(),
        (28, 10).into(),
    ];

    [
        (Make.code(), RawValue::from("Canon")),
        (Model.code(), "Canon EOS 5D Mark III".into()),
        (Orientation.code(), 6_u16.into()),
        (XResolution.code(), (72_u32, 1_u32).into()),
        (YResolution.code(), (72_u32, 1_u32).into()),
        (ResolutionUnit.code(), 2_u16.into()),
        (Software.code(), "Adobe Photoshop Lightroom 6.0 (Macintosh)".into()),
        (DateTime.code(), "2023:07:09 21:02:11".into()),
        (ExifOffset.code(), 210_u32.into()),
        (ExposureTime.code(), (1_u32, 200_u32).into()),
        (FNumber.code(), (28_u32, 10_u32).into()),
        (ExposureProgram.code(), 3_u16.into()),
        (ISOSpeedRatings.code(), 400_u16.into()),
        (ExifVersion.code(), b"0230".to_vec().into()),
        (DateTimeOriginal.code(), "2023:07:09 20:36:33".into()),
        (DateTimeDigitized.code(), "2023:07:09 20:36:33".into()),
        (ShutterSpeedValue.code(), (7_643_856_i32, 1_000_000_i32).into()),
        (ApertureValue.code(), (2_970_854_u32, 1_000_000_u32).into()),
        (ExposureBiasValue.code(), (-2_i32, 3_i32).into()),
        (MaxApertureValue.code(), (3_u32, 1_u32).into()),
        (MeteringMode.code(), 5_u16.into()),
        (Flash.code(), 16_u16.into()),
        (FocalLength.code(), (70_u32, 1_u32).into()),
        (FocalLengthIn35mmFilm.code(), 70_u16.into()),
        (SubsecTimeOriginal.code(), "00".into()),
        (ExifImageWidth.code(), 5760_u32.into()),
        (ExifImageHeight.code(), 3840_u32.into()),
        (WhiteBalance.code(), 0_u16.into()),
        (LensSpecification.code(), lens.into()),
        (LensModel.code(), "EF24-70mm f/2.8L II USM".into()),
        // outside the catalog
        (0x0001, "R98".into()),
        (0x9c9b, vec![0x54_u8, 0x00, 0x69, 0x00].into()),
        (0xea1c, vec![0x1c_u8, 0xea, 0x00, 0x00].into()),
        (0xea1d, 4118_u32.into()),
    ]
    .into_iter()
    .collect()
}
