//! User facing text
//!
//! The storefront is Thai first; English is kept for operators and tests that
//! want readable output.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, HistoryStatus};

/// Asia/Bangkok, UTC+7 without daylight saving
pub const BANGKOK_UTC_OFFSET_MINUTES: i32 = 7 * 60;

/// Supported locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Thai
    #[default]
    Th,
    /// English
    En,
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "th" | "th-th" | "thai" => Ok(Locale::Th),
            "en" | "en-us" | "english" => Ok(Locale::En),
            _ => Err(Error::UnknownLocale(s.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Th => write!(f, "th"),
            Locale::En => write!(f, "en"),
        }
    }
}

/// Message catalog of the payment form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Messages {
    /// Form title
    pub title: String,
    /// Prompt above the QR code
    pub scan_prompt: String,
    /// Label above the price
    pub amount_label: String,
    /// Heading of the instruction list
    pub instructions_heading: String,
    /// Ordered payment steps
    pub instructions: Vec<String>,
    /// Start check button
    pub start_check: String,
    /// Headline while checking
    pub checking: String,
    /// Hint while checking
    pub checking_hint: String,
    /// Confirm button
    pub confirm: String,
    /// Confirm button while the confirmation is in flight
    pub confirming: String,
    /// Heading of the history list
    pub history_heading: String,
    /// History time label
    pub history_time: String,
    /// History status label
    pub history_status: String,
    /// History amount label
    pub history_amount: String,
    /// History status text for a started check
    pub status_pending: String,
    /// History status text for a detected or confirmed payment
    pub status_completed: String,
    /// History status text for a failed check or confirmation
    pub status_failed: String,
    /// Title of success notifications
    pub success_title: String,
    /// Title of error notifications
    pub error_title: String,
    /// Poll detected the payment
    pub payment_detected: String,
    /// Order marked paid
    pub payment_confirmed: String,
    /// Title when the poll gave up
    pub payment_not_found_title: String,
    /// Description when the poll gave up
    pub payment_not_found: String,
    /// Confirmation refused without a reason
    pub confirm_failed: String,
    /// Confirmation errored without a message
    pub confirm_error: String,
    /// Currency symbol used for prices
    pub currency_symbol: String,
    /// `chrono` format string for history timestamps
    pub datetime_format: String,
    /// Offset from UTC, in minutes, timestamps are shown in
    pub utc_offset_minutes: i32,
}

impl Messages {
    /// Catalog for `locale`
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::Th => Self::thai(),
            Locale::En => Self::english(),
        }
    }

    fn thai() -> Self {
        Self {
            title: "ชำระเงินผ่าน PromptPay".to_string(),
            scan_prompt: "กรุณาสแกน QR Code ด้านล่างเพื่อชำระเงิน:".to_string(),
            amount_label: "จำนวนเงินที่ต้องชำระ:".to_string(),
            instructions_heading: "ขั้นตอนการชำระเงิน:".to_string(),
            instructions: vec![
                "เปิดแอปพลิเคชันธนาคารในมือถือของคุณ".to_string(),
                "สแกน QR Code ด้านบน".to_string(),
                "ตรวจสอบจำนวนเงินและผู้รับเงิน".to_string(),
                "ทำการชำระเงิน".to_string(),
                "กดปุ่มด้านล่างหลังจากชำระเงินเสร็จสิ้น".to_string(),
            ],
            start_check: "เริ่มตรวจสอบการชำระเงิน".to_string(),
            checking: "กำลังตรวจสอบการชำระเงิน...".to_string(),
            checking_hint: "กรุณารอสักครู่".to_string(),
            confirm: "ฉันได้ชำระเงินแล้ว".to_string(),
            confirming: "กำลังยืนยัน...".to_string(),
            history_heading: "ประวัติการตรวจสอบ:".to_string(),
            history_time: "เวลา".to_string(),
            history_status: "สถานะ".to_string(),
            history_amount: "จำนวนเงิน".to_string(),
            status_pending: "รอตรวจสอบ".to_string(),
            status_completed: "ชำระเงินสำเร็จ".to_string(),
            status_failed: "ชำระเงินไม่สำเร็จ".to_string(),
            success_title: "สำเร็จ".to_string(),
            error_title: "เกิดข้อผิดพลาด".to_string(),
            payment_detected: "ตรวจพบการชำระเงินสำเร็จ".to_string(),
            payment_confirmed: "ยืนยันการชำระเงินสำเร็จ".to_string(),
            payment_not_found_title: "ไม่พบการชำระเงิน".to_string(),
            payment_not_found: "ไม่พบการชำระเงิน กรุณาลองใหม่อีกครั้ง".to_string(),
            confirm_failed: "ไม่สามารถยืนยันการชำระเงินได้".to_string(),
            confirm_error: "เกิดข้อผิดพลาดในการยืนยันการชำระเงิน".to_string(),
            currency_symbol: "฿".to_string(),
            datetime_format: "%b %-d, %Y, %-I:%M %p".to_string(),
            utc_offset_minutes: BANGKOK_UTC_OFFSET_MINUTES,
        }
    }

    fn english() -> Self {
        Self {
            title: "Pay with PromptPay".to_string(),
            scan_prompt: "Scan the QR code below to pay:".to_string(),
            amount_label: "Amount due:".to_string(),
            instructions_heading: "How to pay:".to_string(),
            instructions: vec![
                "Open your mobile banking app".to_string(),
                "Scan the QR code above".to_string(),
                "Check the amount and the payee".to_string(),
                "Make the payment".to_string(),
                "Press the button below once the payment is done".to_string(),
            ],
            start_check: "Start checking payment".to_string(),
            checking: "Checking payment...".to_string(),
            checking_hint: "Please wait a moment".to_string(),
            confirm: "I have paid".to_string(),
            confirming: "Confirming...".to_string(),
            history_heading: "Check history:".to_string(),
            history_time: "Time".to_string(),
            history_status: "Status".to_string(),
            history_amount: "Amount".to_string(),
            status_pending: "Awaiting check".to_string(),
            status_completed: "Payment successful".to_string(),
            status_failed: "Payment unsuccessful".to_string(),
            success_title: "Success".to_string(),
            error_title: "Error".to_string(),
            payment_detected: "Payment detected".to_string(),
            payment_confirmed: "Payment confirmed".to_string(),
            payment_not_found_title: "Payment not found".to_string(),
            payment_not_found: "No payment was found, please try again".to_string(),
            confirm_failed: "Could not confirm the payment".to_string(),
            confirm_error: "Something went wrong while confirming the payment".to_string(),
            currency_symbol: "฿".to_string(),
            datetime_format: "%b %-d, %Y, %-I:%M %p".to_string(),
            utc_offset_minutes: BANGKOK_UTC_OFFSET_MINUTES,
        }
    }

    /// Label for a history status
    pub fn history_status_label(&self, status: HistoryStatus) -> &str {
        match status {
            HistoryStatus::Pending => &self.status_pending,
            HistoryStatus::Completed => &self.status_completed,
            HistoryStatus::Failed => &self.status_failed,
        }
    }

    /// Format a timestamp for display in the catalog's local time
    ///
    /// An out of range offset falls back to UTC.
    pub fn format_datetime(&self, timestamp: &DateTime<Utc>) -> String {
        match FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60)) {
            Some(offset) => timestamp
                .with_timezone(&offset)
                .format(&self.datetime_format)
                .to_string(),
            None => timestamp.format(&self.datetime_format).to_string(),
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::for_locale(Locale::default())
    }
}
