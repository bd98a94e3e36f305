use std::{error::Error, fmt::Debug, path::Path};

use zarrs_impex::{
    array::{ArrayView, ArrayViewMut},
    element::{DataType, Element, ElementKind, RgbValue, TinyVector},
    impex::{read_array, read_array_from, write_array, ImpexError, ImportInfo},
};

/// Write `view`, then read it back into a destination sized from [`ImportInfo`].
fn write_read<T: Element + Default + PartialEq + Debug>(
    file_path: &Path,
    dataset_path: &str,
    view: &ArrayView<'_, T>,
) -> Result<Vec<T>, Box<dyn Error>> {
    write_array(file_path, dataset_path, view)?;
    let info = ImportInfo::new(file_path, dataset_path)?;
    assert_eq!(info.descriptor().logical_shape(), view.shape());
    assert_eq!(info.element_kind(), T::element_kind());

    let shape = info.descriptor().logical_shape().to_vec();
    let num_elements = usize::try_from(shape.iter().product::<u64>())?;
    let mut read = vec![T::default(); num_elements];
    read_array(&info, &mut ArrayViewMut::from_shape(shape, &mut read)?)?;
    Ok(read)
}

fn rgb_data(len: u32) -> Vec<RgbValue<f64>> {
    (0..len)
        .map(|i| {
            let i = f64::from(i);
            RgbValue::new(i + 0.1, i + 0.2, i + 0.3)
        })
        .collect()
}

fn vector_data(len: u16) -> Vec<TinyVector<u16, 4>> {
    (0..len)
        .map(|i| TinyVector::new([i, i + 100, i + 200, i + 300]))
        .collect()
}

#[test]
#[cfg_attr(miri, ignore)]
fn round_trip_integer_volume() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::TempDir::new()?;
    let file_path = dir.path().join("volume.zarr");

    let data: Vec<i32> = (-12..12).collect();
    let view = ArrayView::from_shape(vec![2, 3, 4], &data)?;
    write_array(&file_path, "group/subgroup/data", &view)?;

    let info = ImportInfo::new(&file_path, "group/subgroup/data")?;
    assert_eq!(info.num_dimensions(), 3);
    assert_eq!(info.shape(), &[2, 3, 4]);
    assert_eq!(info.shape_of_dimension(0), Some(2));
    assert_eq!(info.shape_of_dimension(2), Some(4));
    assert_eq!(info.shape_of_dimension(3), None);
    assert_eq!(info.element_kind(), ElementKind::Scalar(DataType::Int32));
    assert_eq!(info.num_elements(), 24);

    let mut read = vec![0i32; 24];
    read_array(
        &info,
        &mut ArrayViewMut::from_shape(vec![2, 3, 4], &mut read)?,
    )?;
    assert_eq!(read, data);
    Ok(())
}

#[test]
#[cfg_attr(miri, ignore)]
fn round_trip_scalar() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::TempDir::new()?;
    let file_path = dir.path().join("scalar.zarr");

    let data: Vec<f32> = (0..120u16).map(f32::from).collect();
    let image = ArrayView::from_shape(vec![5, 8], &data[..40])?;
    assert_eq!(write_read(&file_path, "image", &image)?, image.to_vec());

    let volume = ArrayView::from_shape(vec![5, 3, 8], &data)?;
    assert_eq!(write_read(&file_path, "volume", &volume)?, data);
    Ok(())
}

#[test]
#[cfg_attr(miri, ignore)]
fn round_trip_scalar_strided() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::TempDir::new()?;
    let file_path = dir.path().join("scalar_strided.zarr");

    let data: Vec<u8> = (0..120).collect();
    let volume = ArrayView::from_shape(vec![5, 3, 8], &data)?;
    let slice = volume.bind_at(1, 2)?;
    assert!(!slice.is_contiguous());
    assert_eq!(slice.shape(), &[5, 8]);

    let read = write_read(&file_path, "strided", &slice)?;
    assert_eq!(read, slice.to_vec());
    assert_eq!(&read[..8], &[16, 17, 18, 19, 20, 21, 22, 23]);
    assert_eq!(&read[8..16], &[40, 41, 42, 43, 44, 45, 46, 47]);
    Ok(())
}

#[test]
#[cfg_attr(miri, ignore)]
fn round_trip_rgb() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::TempDir::new()?;
    let file_path = dir.path().join("rgb.zarr");

    let data = rgb_data(40);
    let view = ArrayView::from_shape(vec![5, 8], &data)?;
    assert_eq!(write_read(&file_path, "rgb", &view)?, data);

    let info = ImportInfo::new(&file_path, "rgb")?;
    assert_eq!(info.shape(), &[5, 8, 3]);
    assert_eq!(info.data_type(), DataType::Float64);
    Ok(())
}

#[test]
#[cfg_attr(miri, ignore)]
fn round_trip_rgb_strided() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::TempDir::new()?;
    let file_path = dir.path().join("rgb_strided.zarr");

    let data = rgb_data(120);
    let slice = ArrayView::from_shape(vec![5, 3, 8], &data)?.bind_at(1, 1)?;
    let read = write_read(&file_path, "group/rgb", &slice)?;
    assert_eq!(read, slice.to_vec());
    assert_eq!(read[0], data[8]);
    Ok(())
}

#[test]
#[cfg_attr(miri, ignore)]
fn round_trip_tiny_vector() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::TempDir::new()?;
    let file_path = dir.path().join("vector.zarr");

    let data = vector_data(24);
    let view = ArrayView::from_shape(vec![2, 3, 4], &data)?;
    assert_eq!(write_read(&file_path, "vectors", &view)?, data);

    let info = ImportInfo::new(&file_path, "vectors")?;
    assert_eq!(info.shape(), &[2, 3, 4, 4]);
    assert_eq!(
        info.element_kind(),
        ElementKind::Composite {
            components: 4,
            data_type: DataType::UInt16
        }
    );
    Ok(())
}

#[test]
#[cfg_attr(miri, ignore)]
fn round_trip_tiny_vector_strided() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::TempDir::new()?;
    let file_path = dir.path().join("vector_strided.zarr");

    let data = vector_data(24);
    let slice = ArrayView::from_shape(vec![4, 3, 2], &data)?.bind_inner(1)?;
    assert_eq!(slice.strides(), &[6, 2]);
    let read = write_read(&file_path, "vectors", &slice)?;
    assert_eq!(read, slice.to_vec());
    assert_eq!(read[1], TinyVector::new([3, 103, 203, 303]));
    Ok(())
}

#[test]
#[cfg_attr(miri, ignore)]
fn read_scalars_as_rgb() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::TempDir::new()?;
    let file_path = dir.path().join("scalars.zarr");

    let data: Vec<f64> = (0..120u8).map(f64::from).collect();
    write_array(
        &file_path,
        "data",
        &ArrayView::from_shape(vec![5, 8, 3], &data)?,
    )?;

    let info = ImportInfo::new(&file_path, "data")?;
    assert_eq!(info.element_kind(), ElementKind::Scalar(DataType::Float64));
    let mut rgb = vec![RgbValue::<f64>::default(); 40];
    read_array(&info, &mut ArrayViewMut::from_shape(vec![5, 8], &mut rgb)?)?;
    for (i, value) in rgb.iter().enumerate() {
        assert_eq!(value.components(), &data[3 * i..3 * i + 3]);
    }
    Ok(())
}

#[test]
#[cfg_attr(miri, ignore)]
fn read_rgb_as_scalars() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::TempDir::new()?;
    let file_path = dir.path().join("rgb_scalars.zarr");

    let data = rgb_data(6);
    write_array(&file_path, "rgb", &ArrayView::from_shape(vec![2, 3], &data)?)?;

    let mut scalars = vec![0f64; 18];
    read_array_from(
        &file_path,
        "rgb",
        &mut ArrayViewMut::from_shape(vec![2, 3, 3], &mut scalars)?,
    )?;
    assert_eq!(&scalars[..3], data[0].components());
    assert_eq!(&scalars[15..], data[5].components());
    Ok(())
}

#[test]
#[cfg_attr(miri, ignore)]
fn read_into_strided_destination() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::TempDir::new()?;
    let file_path = dir.path().join("destination.zarr");

    let data: Vec<i16> = (1..=8).collect();
    write_array(&file_path, "data", &ArrayView::from_shape(vec![2, 4], &data)?)?;

    let mut buffer = vec![-1i16; 24];
    let mut destination = ArrayViewMut::from_shape(vec![2, 4, 3], &mut buffer)?.bind_inner(0)?;
    assert_eq!(destination.strides(), &[12, 3]);
    read_array_from(&file_path, "data", &mut destination)?;

    let read: Vec<i16> = buffer.iter().step_by(3).copied().collect();
    assert_eq!(read, data);
    assert!(buffer
        .iter()
        .enumerate()
        .filter(|(i, _)| i % 3 != 0)
        .all(|(_, &value)| value == -1));
    Ok(())
}

#[test]
#[cfg_attr(miri, ignore)]
fn single_component_composite_is_not_scalar() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::TempDir::new()?;
    let file_path = dir.path().join("single.zarr");

    let data: Vec<TinyVector<u8, 1>> = (0..3).map(|i| TinyVector::new([i])).collect();
    assert_eq!(
        write_read(&file_path, "single", &ArrayView::from_shape(vec![3], &data)?)?,
        data
    );

    let info = ImportInfo::new(&file_path, "single")?;
    assert_eq!(info.shape(), &[3, 1]);
    assert!(info.element_kind().is_composite());

    let mut scalars = vec![0u8; 3];
    let result = read_array(&info, &mut ArrayViewMut::from_shape(vec![3], &mut scalars)?);
    assert!(matches!(result, Err(ImpexError::ShapeMismatch(_))));
    read_array(&info, &mut ArrayViewMut::from_shape(vec![3, 1], &mut scalars)?)?;
    assert_eq!(scalars, vec![0, 1, 2]);
    Ok(())
}

#[test]
#[cfg_attr(miri, ignore)]
fn round_trip_float16() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::TempDir::new()?;
    let file_path = dir.path().join("half.zarr");

    let data: Vec<half::f16> = (0..6u8)
        .map(|i| half::f16::from_f32(f32::from(i) * 0.5))
        .collect();
    let view = ArrayView::from_shape(vec![3, 2], &data)?;
    assert_eq!(write_read(&file_path, "half", &view)?, data);
    assert_eq!(
        ImportInfo::new(&file_path, "half")?.data_type(),
        DataType::Float16
    );
    Ok(())
}
