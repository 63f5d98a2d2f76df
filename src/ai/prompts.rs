#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Korean,
    SimplifiedChinese,
    TraditionalChinese,
}

impl Language {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Self::English),
            "ko" => Some(Self::Korean),
            "zh-CN" => Some(Self::SimplifiedChinese),
            "zh-TW" => Some(Self::TraditionalChinese),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Korean => "ko",
            Self::SimplifiedChinese => "zh-CN",
            Self::TraditionalChinese => "zh-TW",
        }
    }

    pub fn english_name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Korean => "Korean",
            Self::SimplifiedChinese => "Simplified Chinese",
            Self::TraditionalChinese => "Traditional Chinese",
        }
    }
}

pub fn language_name(code: &str) -> &'static str {
    match Language::from_code(code) {
        Some(lang) => lang.english_name(),
        None => "日本語",
    }
}

pub fn reply_prompt(author: &str, rating: i64, text: &str) -> String {
    format!(
        "あなたは店舗のオーナーです。以下の口コミに対して、丁寧で感謝の気持ちが伝わる返信文を作成してください。\n\n\
        口コミ情報:\n\
        - 投稿者: {author}\n\
        - 評価: {rating}星\n\
        - 内容: {text}\n\n\
        条件:\n\
        - 日本語で記述してください。\n\
        - 300文字以内で簡潔にまとめてください。\n\
        - 評価が高い場合は感謝を、低い場合は真摯な謝罪と改善の意向を含めてください。"
    )
}

pub fn survey_greeting_prompt(title: &str, keywords: &[String]) -> String {
    format!(
        "あなたは店舗のオーナーです。以下のアンケートタイトルとキーワードに基づいて、アンケートの冒頭に表示する挨拶文（プレビュー）を作成してください。\n\n\
        アンケート情報:\n\
        - タイトル: {title}\n\
        - キーワード: {}\n\n\
        条件:\n\
        - 日本語で記述してください。\n\
        - 200文字以内で簡潔にまとめてください。\n\
        - キーワードを自然な形で文章に盛り込んでください。\n\
        - 顧客への感謝と、意見がサービス向上に役立つことを伝えてください。",
        keywords.join(", ")
    )
}

pub fn review_draft_prompt(
    store_name: &str,
    q1: &str,
    q2: &[String],
    q3: &str,
    language_code: &str,
) -> String {
    format!(
        "あなたは顧客として「{store_name}」を利用しました。以下のアンケート回答に基づいて、Googleマップに投稿するための口コミ文章を作成してください。\n\n\
        アンケート回答:\n\
        - Q1詳細: {q1}\n\
        - Q2よかった点(オプション): {}\n\
        - Q3感想(自由記述): {q3}\n\n\
        条件:\n\
        - **{}**で記述してください。\n\
        - 自然な口調で書いてください。\n\
        - 回答内容を反映し、具体的で好意的な内容にしてください。\n\
        - 200文字〜400文字程度でまとめてください。",
        q2.join(", "),
        language_name(language_code)
    )
}

pub fn translate_survey_prompt(payload_json: &str, target: Language) -> String {
    format!(
        "You are a professional translator. Translate the following survey JSON object into {}.\n\
        Evaluate the JSON structure and only translate the values of \"title\", \"label\", \"options\" fields.\n\
        Do NOT change any keys or structure. Return ONLY the valid JSON string.\n\n\
        Original JSON:\n{payload_json}",
        target.english_name()
    )
}
