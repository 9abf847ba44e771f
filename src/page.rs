//! HTML rendering for the consultation page.

use crate::models::ConsultationOutcome;
use crate::persona::Persona;
use minijinja::{context, Environment, Value};
use pulldown_cmark::{html, Parser};
use serde::Serialize;
use thiserror::Error;

pub const PAGE_TITLE: &str = "お悩み相談AIアプリ";
pub const PAGE_ICON: &str = "💡";
pub const SELECTOR_LABEL: &str = "相談する専門家を選んでください：";
pub const INPUT_LABEL: &str = "相談内容を入力してください：";
pub const INPUT_PLACEHOLDER: &str = "例：最近太り気味で... / 毎月のお小遣いを節約するには...";
pub const SUBMIT_LABEL: &str = "相談する";
pub const SUCCESS_NOTICE: &str = "回答が届きました！";
pub const ERROR_NOTICE: &str = "エラーが発生しました。APIキーの設定などをご確認ください。";

const DESCRIPTION_MARKDOWN: &str = "\
### アプリの概要
このアプリは、あなたの悩みに合わせて2種類の「専門家AI」が回答してくれる相談アプリです。
健康や体づくりについては**パーソナルトレーナー**に、お金や家計については**ファイナンシャルプランナー**に相談してみましょう！

### 操作方法
1. 下記のラジオボタンから、相談したい専門家を選択してください。
2. 相談内容を入力フォームに書き込んでください。
3. 「相談する」ボタンを押すと、専門家AIからの回答が表示されます。
---
";

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="ja">
<head>
<meta charset="utf-8">
<title>{{ title }}</title>
<link rel="icon" href="data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22><text y=%22.9em%22 font-size=%2290%22>{{ icon }}</text></svg>">
<style>
body { font-family: sans-serif; max-width: 720px; margin: 2rem auto; padding: 0 1rem; }
textarea { width: 100%; min-height: 8rem; }
.block { padding: .75rem 1rem; border-radius: .5rem; margin: 1rem 0; }
.warning { background: #fff8e1; }
.success { background: #e8f5e9; }
.error { background: #ffebee; white-space: pre-wrap; }
.answer { white-space: pre-wrap; }
#spinner { display: none; }
</style>
</head>
<body>
<h1>{{ icon }} {{ title }}</h1>
{{ description }}
<form method="post" action="/" id="consultation_form">
<fieldset>
<legend>{{ selector_label }}</legend>
{% for persona in personas %}
<label><input type="radio" name="persona" value="{{ persona.label }}"{% if persona.selected %} checked{% endif %}> {{ persona.label }}</label><br>
{% endfor %}
</fieldset>
<p><label for="input">{{ input_label }}</label></p>
<textarea id="input" name="input" placeholder="{{ placeholder }}">{{ input }}</textarea>
<p><button type="submit">{{ submit_label }}</button></p>
</form>
<p id="spinner"></p>
{% if outcome %}
{% if outcome.kind == "warning" %}
<div class="block warning">{{ outcome.message }}</div>
{% elif outcome.kind == "answer" %}
<div class="block success">{{ success_notice }}</div>
<p><strong>{{ outcome.persona }}からのアドバイス：</strong></p>
<div class="answer">{{ outcome.text }}</div>
{% else %}
<div class="block error">{{ error_notice }}
詳細: {{ outcome.text }}</div>
{% endif %}
{% endif %}
<script>
document.getElementById("consultation_form").addEventListener("submit", function () {
  var checked = document.querySelector("input[name=persona]:checked");
  var spinner = document.getElementById("spinner");
  spinner.textContent = (checked ? checked.value : "") + " が回答を考えています...";
  spinner.style.display = "block";
});
</script>
</body>
</html>
"#;

#[derive(Error, Debug)]
#[error("page rendering failed: {0}")]
pub struct PageError(#[from] minijinja::Error);

#[derive(Serialize)]
struct PersonaOption {
    label: &'static str,
    selected: bool,
}

#[derive(Serialize)]
struct OutcomeView<'a> {
    kind: &'static str,
    message: &'a str,
    persona: &'static str,
    text: &'a str,
}

impl<'a> From<&'a ConsultationOutcome> for OutcomeView<'a> {
    fn from(outcome: &'a ConsultationOutcome) -> Self {
        match outcome {
            ConsultationOutcome::Warning { message } => OutcomeView {
                kind: "warning",
                message,
                persona: "",
                text: "",
            },
            ConsultationOutcome::Answer { persona, text } => OutcomeView {
                kind: "answer",
                message: "",
                persona: persona.label(),
                text,
            },
            ConsultationOutcome::Failed { persona, detail } => OutcomeView {
                kind: "error",
                message: "",
                persona: persona.label(),
                text: detail,
            },
        }
    }
}

pub struct Page {
    env: Environment<'static>,
    description_html: String,
}

impl Page {
    pub fn new() -> Result<Self, PageError> {
        let mut env = Environment::new();
        // The .html name turns on auto-escaping.
        env.add_template("index.html", PAGE_TEMPLATE)?;

        Ok(Self {
            env,
            description_html: markdown_to_html(DESCRIPTION_MARKDOWN),
        })
    }

    pub fn render(
        &self,
        selected: Persona,
        input: &str,
        outcome: Option<&ConsultationOutcome>,
    ) -> Result<String, PageError> {
        let personas: Vec<PersonaOption> = Persona::ALL
            .iter()
            .map(|p| PersonaOption {
                label: p.label(),
                selected: *p == selected,
            })
            .collect();

        let template = self.env.get_template("index.html")?;
        let html = template.render(context! {
            title => PAGE_TITLE,
            icon => PAGE_ICON,
            description => Value::from_safe_string(self.description_html.clone()),
            selector_label => SELECTOR_LABEL,
            personas => personas,
            input_label => INPUT_LABEL,
            placeholder => INPUT_PLACEHOLDER,
            input => input,
            submit_label => SUBMIT_LABEL,
            success_notice => SUCCESS_NOTICE,
            error_notice => ERROR_NOTICE,
            outcome => outcome.map(OutcomeView::from),
        })?;
        Ok(html)
    }
}

fn markdown_to_html(markdown: &str) -> String {
    let mut out = String::new();
    html::push_html(&mut out, Parser::new(markdown));
    out
}
