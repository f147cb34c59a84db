use serde::{Deserialize, Serialize};
use tracing::warn;

/// Target language of the assistant persona and of every canned text it emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    Arabic,
    English,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Arabic => "ar",
            Locale::English => "en",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "ar" | "arabic" => Locale::Arabic,
            "en" | "english" => Locale::English,
            unknown => {
                warn!("Unknown locale '{}', defaulting to Arabic", unknown);
                Locale::Arabic
            }
        }
    }

    /// Persona instruction sent with every chat turn.
    pub fn system_instruction(&self) -> &'static str {
        match self {
            Locale::Arabic => "\
أنت \"خبير السيارات الذكي\"، متخصص عالمي في ميكانيكا السيارات، التصميم، سوق الأسعار، والتقنيات الحديثة.
تحدث باللغة العربية بأسلوب مهني وودي. إذا سألك المستخدم عن مقارنة، قدم له بيانات دقيقة.
إذا أرسل لك صورة سيارة، حاول التعرف على الموديل وسنة الصنع والمواصفات.
استخدم أدوات البحث للحصول على أحدث الأسعار إذا لزم الأمر.",
            Locale::English => "\
You are \"the Smart Car Expert\", a world-class specialist in automotive mechanics, design, \
market pricing and modern vehicle technology.
Answer in English in a professional, friendly tone. When asked for a comparison, give precise data.
When sent a photo of a car, identify the model, the model year and its specifications.
Use the search tools to look up current prices when needed.",
        }
    }

    /// Prompt used when an image arrives without accompanying text.
    pub fn identify_prompt(&self) -> &'static str {
        match self {
            Locale::Arabic => "ما هذه السيارة؟ أخبرني عن مواصفاتها وتاريخها.",
            Locale::English => "What is this car? Tell me about its specs and history.",
        }
    }

    /// Prompt used by the dedicated photo-analysis action.
    pub fn analyze_prompt(&self) -> &'static str {
        match self {
            Locale::Arabic => "حلل هذه السيارة بالتفصيل، ما نوعها؟ وما هي أبرز مميزاتها وعيوبها؟",
            Locale::English => {
                "Analyze this car in detail. What type is it, and what are its main strengths and weaknesses?"
            }
        }
    }

    pub fn comparison_prompt(&self, car1: &str, car2: &str) -> String {
        match self {
            Locale::Arabic => format!("قارن بين {car1} و {car2} في جدول بيانات JSON."),
            Locale::English => format!("Compare {car1} and {car2} in a JSON data table."),
        }
    }

    /// Text of the model turn substituted for a failed chat request.
    pub fn apology(&self) -> &'static str {
        match self {
            Locale::Arabic => "عذراً، حدث خطأ أثناء معالجة طلبك. حاول مرة أخرى.",
            Locale::English => "Sorry, something went wrong while processing your request. Please try again.",
        }
    }

    /// Title given to a citation whose source omitted one.
    pub fn link_placeholder(&self) -> &'static str {
        match self {
            Locale::Arabic => "رابط مرجعي",
            Locale::English => "reference link",
        }
    }

    pub fn greeting(&self) -> &'static str {
        match self {
            Locale::Arabic => "مرحباً بك في عالم السيارات! أنا خبيرك الشخصي. كيف يمكنني مساعدتك اليوم؟ يمكنك سؤالي عن مواصفات، مقارنات، أو حتى رفع صورة لسيارة للتعرف عليها.",
            Locale::English => "Welcome to the world of cars! I'm your personal expert. How can I help you today? Ask me about specs, comparisons, or share a photo of a car to identify it.",
        }
    }
}
