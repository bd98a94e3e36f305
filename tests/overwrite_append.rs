use std::error::Error;

use zarrs_impex::{
    array::{ArrayView, ArrayViewMut},
    config::OverwritePolicy,
    container::{Container, DatasetError},
    element::{DataType, ElementKind},
    impex::{read_array, read_array_from, write_array, ImpexError, ImportInfo},
};

fn int_image() -> Vec<i32> {
    (0..110).map(|i| i * 3 - 7).collect()
}

fn float_volume() -> Vec<f64> {
    (0..240u8).map(|i| f64::from(i) / 4.0).collect()
}

#[test]
#[cfg_attr(miri, ignore)]
fn overwrite_with_different_descriptor() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::TempDir::new()?;
    let file_path = dir.path().join("overwrite.zarr");

    let image = int_image();
    write_array(&file_path, "data", &ArrayView::from_shape(vec![10, 11], &image)?)?;
    assert_eq!(ImportInfo::new(&file_path, "data")?.shape(), &[10, 11]);

    let volume = float_volume();
    write_array(
        &file_path,
        "data",
        &ArrayView::from_shape(vec![10, 2, 3, 4], &volume)?,
    )?;

    let info = ImportInfo::new(&file_path, "data")?;
    assert_eq!(info.shape(), &[10, 2, 3, 4]);
    assert_eq!(info.element_kind(), ElementKind::Scalar(DataType::Float64));

    let mut read = vec![0f64; 240];
    read_array(
        &info,
        &mut ArrayViewMut::from_shape(vec![10, 2, 3, 4], &mut read)?,
    )?;
    assert_eq!(read, volume);

    // The old shape and data type are gone
    let mut stale = vec![0i32; 110];
    assert!(matches!(
        read_array(&info, &mut ArrayViewMut::from_shape(vec![10, 11], &mut stale)?),
        Err(ImpexError::ShapeMismatch(_))
    ));
    let mut stale = vec![0i32; 240];
    assert!(matches!(
        read_array(
            &info,
            &mut ArrayViewMut::from_shape(vec![10, 2, 3, 4], &mut stale)?
        ),
        Err(ImpexError::IncompatibleDataType(_))
    ));
    Ok(())
}

#[test]
#[cfg_attr(miri, ignore)]
fn overwrite_with_same_descriptor() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::TempDir::new()?;
    let file_path = dir.path().join("rewrite.zarr");

    let image = int_image();
    write_array(&file_path, "data", &ArrayView::from_shape(vec![10, 11], &image)?)?;
    let reversed: Vec<i32> = image.iter().rev().copied().collect();
    write_array(&file_path, "data", &ArrayView::from_shape(vec![10, 11], &reversed)?)?;

    let mut read = vec![0i32; 110];
    read_array_from(
        &file_path,
        "data",
        &mut ArrayViewMut::from_shape(vec![10, 11], &mut read)?,
    )?;
    assert_eq!(read, reversed);
    Ok(())
}

#[test]
#[cfg_attr(miri, ignore)]
fn append_keeps_other_datasets() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::TempDir::new()?;
    let file_path = dir.path().join("append.zarr");

    let image = int_image();
    write_array(
        &file_path,
        "group/data1",
        &ArrayView::from_shape(vec![10, 11], &image)?,
    )?;
    let volume = float_volume();
    write_array(
        &file_path,
        "group/subgroup/data2",
        &ArrayView::from_shape(vec![10, 2, 3, 4], &volume)?,
    )?;

    let info = ImportInfo::new(&file_path, "group/data1")?;
    assert_eq!(info.shape(), &[10, 11]);
    let mut read_image = vec![0i32; 110];
    read_array(
        &info,
        &mut ArrayViewMut::from_shape(vec![10, 11], &mut read_image)?,
    )?;
    assert_eq!(read_image, image);

    let info = ImportInfo::new(&file_path, "group/subgroup/data2")?;
    assert_eq!(info.shape(), &[10, 2, 3, 4]);
    let mut read_volume = vec![0f64; 240];
    read_array(
        &info,
        &mut ArrayViewMut::from_shape(vec![10, 2, 3, 4], &mut read_volume)?,
    )?;
    assert_eq!(read_volume, volume);
    Ok(())
}

#[test]
#[cfg_attr(miri, ignore)]
fn overwrite_policy_fail() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::TempDir::new()?;
    let mut container = Container::open(dir.path().join("fail.zarr"))?;
    container.set_overwrite_policy(OverwritePolicy::Fail);

    let image = int_image();
    let view = ArrayView::from_shape(vec![10, 11], &image)?;
    container.write_array("data", &view)?;
    container.write_array("data", &view)?;

    let transposed = ArrayView::from_shape(vec![11, 10], &image)?;
    assert!(matches!(
        container.write_array("data", &transposed),
        Err(DatasetError::IncompatibleDataset { .. })
    ));

    let mut read = vec![0i32; 110];
    container.read_array("data", &mut ArrayViewMut::from_shape(vec![10, 11], &mut read)?)?;
    assert_eq!(read, image);
    Ok(())
}

#[test]
#[cfg_attr(miri, ignore)]
fn error_kinds() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::TempDir::new()?;
    let file_path = dir.path().join("errors.zarr");

    let data: Vec<u32> = (0..24).collect();
    let view = ArrayView::from_shape(vec![2, 3, 4], &data)?;
    write_array(&file_path, "group/data", &view)?;

    assert!(matches!(
        ImportInfo::new(&file_path, "group/missing"),
        Err(ImpexError::NotFound(_))
    ));
    assert!(matches!(
        ImportInfo::new(&file_path, "group"),
        Err(ImpexError::NotFound(_))
    ));
    assert!(matches!(
        write_array(&file_path, "group/data/child", &view),
        Err(ImpexError::InvalidPath(_))
    ));
    assert!(matches!(
        write_array(&file_path, "group", &view),
        Err(ImpexError::InvalidPath(_))
    ));
    assert!(matches!(
        write_array(&file_path, "group//data", &view),
        Err(ImpexError::InvalidPath(_))
    ));

    let mut read = vec![0u32; 24];
    assert!(matches!(
        read_array_from(
            &file_path,
            "group/data",
            &mut ArrayViewMut::from_shape(vec![4, 3, 2], &mut read)?
        ),
        Err(ImpexError::ShapeMismatch(_))
    ));
    assert!(matches!(
        read_array_from(
            &file_path,
            "group/data",
            &mut ArrayViewMut::from_shape(vec![6, 4], &mut read)?
        ),
        Err(ImpexError::ShapeMismatch(_))
    ));
    Ok(())
}
