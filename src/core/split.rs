use crate::core::errors::RoomshareError;

/// Each member's part of a shared bill, rounded to cents.
pub fn per_member_share(total_amount: f64, group_size: i64) -> Result<f64, RoomshareError> {
    if group_size < 1 {
        return Err(RoomshareError::DivisionDomain(group_size));
    }
    let share = total_amount / group_size as f64;
    Ok((share * 100.0).round() / 100.0)
}

pub fn format_share(share: f64) -> String {
    format!("{:.2}", share)
}
