/// Whole rupees with Indian digit grouping: `₹12,34,567`. An absent amount
/// renders as `₹0`.
pub fn format_inr(amount: Option<f64>) -> String {
    let Some(amount) = amount.filter(|a| a.is_finite()) else {
        return "₹0".to_string();
    };
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    // Last three digits form one group, the rest are grouped in pairs.
    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut pairs: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            pairs.push(&head[start..end]);
            end = start;
        }
        pairs.reverse();
        format!("{},{}", pairs.join(","), tail)
    };
    format!("{}₹{}", sign, grouped)
}
