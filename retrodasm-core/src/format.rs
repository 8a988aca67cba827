//! Numeric formatting helpers used while building instruction text

/// Format a byte as a two-digit uppercase hex string
pub fn int_to_x2(value: u8) -> String {
    format!("{:02X}", value)
}

/// Format a 16-bit value as a four-digit uppercase hex string
pub fn int_to_x4(value: u16) -> String {
    format!("{:04X}", value)
}

/// Reinterpret a byte as a signed value
pub fn to_sbyte(value: u8) -> i32 {
    value as i8 as i32
}

/// Format a byte as a three-digit decimal string
pub fn to_decimal3(value: u8) -> String {
    format!("{:03}", value)
}

/// Format a 16-bit value as a five-digit decimal string
pub fn to_decimal5(value: u16) -> String {
    format!("{:05}", value)
}
