use clap::ValueEnum;

/// Language of console text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Lang {
    En,
    #[value(name = "zh-tw")]
    ZhTw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Text {
    pub en: &'static str,
    pub zh_tw: &'static str,
}

impl Text {
    pub const fn new(en: &'static str, zh_tw: &'static str) -> Self {
        Self { en, zh_tw }
    }

    pub fn get(self, lang: Lang) -> &'static str {
        match lang {
            Lang::En => self.en,
            Lang::ZhTw => self.zh_tw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_get() {
        let t = Text::new("hint", "提示");
        assert_eq!(t.get(Lang::En), "hint");
        assert_eq!(t.get(Lang::ZhTw), "提示");
    }
}
