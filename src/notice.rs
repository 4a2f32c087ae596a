//! Short-lived messages shown after a user action.

use crate::filter::{size_description, Toggle};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

impl Notice {
    fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn toggled(toggle: Toggle) -> Self {
        let label = size_description(toggle.size);
        if toggle.added {
            Self::new(Level::Info, format!("➕ Đã thêm: {}", label))
        } else {
            Self::new(Level::Info, format!("➖ Đã bỏ: {}", label))
        }
    }

    pub fn cleared() -> Self {
        Self::new(Level::Success, "✅ Đã bỏ tất cả lọc")
    }

    pub fn exported() -> Self {
        Self::new(Level::Success, "✅ Tải xuống thành công!")
    }

    pub fn export_failed() -> Self {
        Self::new(Level::Error, "❌ Lỗi khi tải xuống!")
    }

    pub fn load_failed() -> Self {
        Self::new(Level::Error, "Lỗi khi tải dữ liệu. Vui lòng thử lại!")
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_messages() {
        let added = Notice::toggled(Toggle { size: 1, added: true });
        assert_eq!(added.message, "➕ Đã thêm: Không sáp nhập");
        assert_eq!(added.level, Level::Info);

        let removed = Notice::toggled(Toggle { size: 4, added: false });
        assert_eq!(removed.to_string(), "➖ Đã bỏ: Sáp nhập 4 đơn vị");
    }

    #[test]
    fn export_levels() {
        assert_eq!(Notice::exported().level, Level::Success);
        assert_eq!(Notice::export_failed().level, Level::Error);
    }
}
