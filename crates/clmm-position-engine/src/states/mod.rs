pub mod account_data;
pub mod layout;
pub mod mint;
pub mod pool;
pub mod position;
pub mod tick;
pub mod tick_array;

#[cfg(test)]
pub mod test_utils;
