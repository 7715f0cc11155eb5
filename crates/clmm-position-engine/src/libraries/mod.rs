pub mod big_num;
pub mod fixed_point_x64;
pub mod full_math;
pub mod liquidity_amounts;
pub mod tick_math;
