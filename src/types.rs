use ndarray::{
    Array1,
    Array2,
    Array3,
};

pub type Result<T> = anyhow::Result<T>;

pub type Vector<T> = Array1<T>;  // Define this type to use broadcast operations.
pub type Matrix<T> = Array2<T>;
pub type Cube<T>   = Array3<T>;
pub type Vec3<T>   = [T;3];
pub type Mat33<T>  = [[T;3];3];   // 3x3 matrix, row vectors
