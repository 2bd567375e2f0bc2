//! 電話號碼的數字投影與輸入遮罩

/// 最多保留的數字位數（遮罩長度 12 = 9 位數字 + 3 個空白）
pub const MASK_DIGITS: usize = 9;

/// 只保留 ASCII 數字
pub fn digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// 將輸入格式化為 `XX XXX XX XX`，多餘的數字會被截斷
pub fn format_phone_input(raw: &str) -> String {
    let mut formatted = String::with_capacity(MASK_DIGITS + 3);
    for (index, digit) in digits(raw).chars().take(MASK_DIGITS).enumerate() {
        if matches!(index, 2 | 5 | 7) {
            formatted.push(' ');
        }
        formatted.push(digit);
    }
    formatted
}
