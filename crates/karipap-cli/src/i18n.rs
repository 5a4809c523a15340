use serde::{Deserialize, Serialize};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    pub fn label(self) -> &'static str {
        match self {
            Locale::En => "EN",
            Locale::Zh => "中文",
        }
    }

    pub fn next(self) -> Locale {
        match self {
            Locale::En => Locale::Zh,
            Locale::Zh => Locale::En,
        }
    }

    // ── Formatted strings ──

    pub fn image_size_error(self, limit_bytes: u64) -> String {
        let mb = limit_bytes / (1024 * 1024);
        match self {
            Locale::En => format!("Image size cannot exceed {mb}MB"),
            Locale::Zh => format!("图片大小不能超过{mb}MB"),
        }
    }

    pub fn upload_hint(self, limit_bytes: u64) -> String {
        let mb = limit_bytes / (1024 * 1024);
        match self {
            Locale::En => format!("Supports JPG, PNG, GIF, WebP, BMP (max {mb}MB)"),
            Locale::Zh => format!("支持 JPG、PNG、GIF、WebP、BMP（最大{mb}MB）"),
        }
    }

    pub fn ocr_test_succeeded(self, chars: usize) -> String {
        match self {
            Locale::En => format!("✅ OCR test succeeded: {chars} characters recognised"),
            Locale::Zh => format!("✅ OCR 测试成功！识别到 {chars} 个字符"),
        }
    }

    pub fn ocr_test_failed(self, reason: &str) -> String {
        match self {
            Locale::En => format!("❌ OCR test failed: {reason}"),
            Locale::Zh => format!("❌ OCR测试失败：{reason}"),
        }
    }

    pub fn read_file_error(self, reason: &str) -> String {
        match self {
            Locale::En => format!("Cannot read file: {reason}"),
            Locale::Zh => format!("无法读取文件：{reason}"),
        }
    }
}

/// All translatable strings in the application.
/// Call `t(locale)` to get the struct for a given locale.
pub struct T {
    // ── Header ──
    pub title: &'static str,
    pub subtitle: &'static str,
    pub backend_online: &'static str,
    pub backend_offline: &'static str,
    pub backend_checking: &'static str,

    // ── Tabs & input ──
    pub fake_news: &'static str,
    pub clickbait: &'static str,
    pub text_input: &'static str,
    pub image_input: &'static str,
    pub text_placeholder: &'static str,
    pub detect_news: &'static str,
    pub detect_clickbait: &'static str,
    pub analyzing: &'static str,
    pub processing: &'static str,
    pub upload_main: &'static str,
    pub image_path: &'static str,
    pub selected_image: &'static str,
    pub under_development: &'static str,

    // ── OCR status ──
    pub extracting_text: &'static str,
    pub ocr_completed: &'static str,
    pub ocr_failed: &'static str,
    pub ocr_no_text: &'static str,
    pub ocr_testing: &'static str,
    pub ocr_result_title: &'static str,

    // ── Result ──
    pub detection_result: &'static str,
    pub image: &'static str,
    pub text: &'static str,
    pub ocr_result: &'static str,
    pub prediction: &'static str,
    pub fake_news_result: &'static str,
    pub real_news: &'static str,
    pub cannot_determine: &'static str,
    pub system_error: &'static str,
    pub explanation: &'static str,
    pub key_points: &'static str,
    pub confidence: &'static str,
    pub clickbait_score: &'static str,
    pub clickbait_elements: &'static str,
    pub is_clickbait: &'static str,
    pub not_clickbait: &'static str,
    pub processing_time: &'static str,
    pub seconds: &'static str,
    pub characters: &'static str,
    pub received_at: &'static str,
    pub request_failed: &'static str,
    pub try_again: &'static str,

    // ── Alerts ──
    pub notice: &'static str,
    pub enter_text_error: &'static str,
    pub select_image_error: &'static str,
    pub backend_status: &'static str,
    pub vision_api: &'static str,
    pub dismiss_hint: &'static str,

    // ── Footer ──
    pub help: &'static str,
}

pub fn t(locale: Locale) -> T {
    match locale {
        Locale::En => T {
            // Header
            title: "ABANG KARIPAP",
            subtitle: "The Fact Checker",
            backend_online: "● Backend online",
            backend_offline: "● Backend offline",
            backend_checking: "○ Checking backend…",

            // Tabs & input
            fake_news: "Fake News Detection",
            clickbait: "Clickbait Detection",
            text_input: "Text Input",
            image_input: "Image Input",
            text_placeholder: "Paste news text or headline here...",
            detect_news: "Detect Fake News",
            detect_clickbait: "Check Clickbait",
            analyzing: "Analyzing...",
            processing: "Processing...",
            upload_main: "Type an image path and press Enter, or drop a file into the terminal",
            image_path: "Image path",
            selected_image: "Selected image",
            under_development: "This feature is under development, stay tuned...",

            // OCR status
            extracting_text: "Extracting text from image...",
            ocr_completed: "✅ OCR completed",
            ocr_failed: "❌ OCR failed",
            ocr_no_text: "⚠️ No text detected in image",
            ocr_testing: "Testing OCR...",
            ocr_result_title: "OCR result",

            // Result
            detection_result: "Detection Result",
            image: "Image",
            text: "Text",
            ocr_result: "Text from Image",
            prediction: "Prediction",
            fake_news_result: "Fake News",
            real_news: "Real News",
            cannot_determine: "Cannot Determine",
            system_error: "System Error",
            explanation: "Explanation",
            key_points: "Key Points",
            confidence: "Confidence",
            clickbait_score: "Clickbait Score",
            clickbait_elements: "Clickbait Elements",
            is_clickbait: "Clickbait",
            not_clickbait: "Not Clickbait",
            processing_time: "Processing Time",
            seconds: "seconds",
            characters: "characters",
            received_at: "Received",
            request_failed: "Request failed",
            try_again: "Press Esc and try again",

            // Alerts
            notice: "Notice",
            enter_text_error: "Please enter text to analyze",
            select_image_error: "Please select an image",
            backend_status: "Backend status",
            vision_api: "Google Vision",
            dismiss_hint: "[Esc] dismiss",

            // Footer
            help: concat!(
                "^T tab  ^E text/image  ^L language  ^S submit  ^X clear image  ",
                "^R test OCR  ^H health  Esc dismiss  ^Q quit",
            ),
        },
        Locale::Zh => T {
            // Header
            title: "ABANG KARIPAP",
            subtitle: "事实核查员",
            backend_online: "● 后端在线",
            backend_offline: "● 后端离线",
            backend_checking: "○ 正在检查后端…",

            // Tabs & input
            fake_news: "假新闻检测",
            clickbait: "标题党检测",
            text_input: "文字输入",
            image_input: "图片输入",
            text_placeholder: "在这里粘贴新闻文字或标题...",
            detect_news: "检测假新闻",
            detect_clickbait: "检测标题党",
            analyzing: "分析中...",
            processing: "处理中...",
            upload_main: "输入图片路径并按回车，或将文件拖入终端",
            image_path: "图片路径",
            selected_image: "已选图片",
            under_development: "此功能正在开发中，敬请期待...",

            // OCR status
            extracting_text: "正在提取图片中的文字...",
            ocr_completed: "✅ OCR完成",
            ocr_failed: "❌ OCR失败",
            ocr_no_text: "⚠️ 图片中未检测到文字",
            ocr_testing: "正在测试 OCR...",
            ocr_result_title: "OCR识别结果",

            // Result
            detection_result: "检测结果",
            image: "图片",
            text: "文字",
            ocr_result: "图片文字",
            prediction: "判断结果",
            fake_news_result: "假新闻",
            real_news: "真实新闻",
            cannot_determine: "无法判断",
            system_error: "系统错误",
            explanation: "解释说明",
            key_points: "关键判断点",
            confidence: "置信度",
            clickbait_score: "标题党评分",
            clickbait_elements: "标题党元素",
            is_clickbait: "标题党",
            not_clickbait: "非标题党",
            processing_time: "处理时间",
            seconds: "秒",
            characters: "个字符",
            received_at: "接收时间",
            request_failed: "请求失败",
            try_again: "按 Esc 后重试",

            // Alerts
            notice: "提示",
            enter_text_error: "请输入要分析的文本",
            select_image_error: "请选择图片",
            backend_status: "后端状态",
            vision_api: "Google Vision",
            dismiss_hint: "[Esc] 关闭",

            // Footer
            help: concat!(
                "^T 切换标签  ^E 文字/图片  ^L 语言  ^S 提交  ^X 清除图片  ",
                "^R 测试OCR  ^H 后端状态  Esc 关闭  ^Q 退出",
            ),
        },
    }
}
