pub mod softmax_regression;

pub use softmax_regression::SoftmaxRegression;
