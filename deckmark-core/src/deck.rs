//! Presentation structure and the edits that fill a slide.
//!
//! A [`Presentation`] is the structured deck a generator produces (JSON, keys as below). Each
//! slide is laid out on a template page whose placeholders are already known; planning only
//! decides which ops go into which placeholder:
//!
//! - Content slides: title and subtitle are inserted as plain text, the body is markdown and goes
//!   through the full flatten / compile / schedule pipeline.
//! - Chapter slides: the title, plus the chapter number in the body placeholder. Chapters are
//!   numbered from 0 in deck order.
//! - The cover, planned separately with [`DeckPlanner::plan_cover`]: deck title, date, app name
//!   and deck subtitle.
//!
//! A slide whose illustration has an image URL also gets a `createImage` request on its page,
//! followed by the alt text. Both are raw requests addressed to the page, not a placeholder.
//!
//! Placeholders are filled from empty, so no op list starts with a `DeleteAll`.

use crate::common::compile::{compile, CompileOptions};
use crate::common::flatten::flatten;
use crate::common::schedule::schedule;
use crate::error::PlanError;
use crate::formats::markdown::parser::parse_markdown;
use crate::ir::ops::EditOp;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Text of the cover's app-name placeholder.
pub const APP_NAME: &str = "deckmark";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Presentation {
    #[serde(rename = "presentation_title", default)]
    pub title: String,
    #[serde(rename = "presentation_subtitle", default)]
    pub subtitle: String,
    #[serde(default)]
    pub slides: Vec<Slide>,
}

impl Presentation {
    pub fn from_json(source: &str) -> Result<Self, PlanError> {
        serde_json::from_str(source).map_err(|e| PlanError::InvalidPresentation(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Slide {
    pub title: String,
    pub subtitle: String,
    /// Markdown body, or the description of a chapter.
    pub body: String,
    pub chapter: bool,
    pub illustration: Illustration,
}

/// Image to generate for a slide. Every field is blank when there is none.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Illustration {
    pub prompt: String,
    pub alt: String,
    /// Where the generated image was uploaded. Blank until then.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
}

impl Illustration {
    pub fn is_empty(&self) -> bool {
        self.prompt.trim().is_empty()
    }
}

/// Object ids of a slide's page and text placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Placeholders {
    pub page: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub body: Option<String>,
}

impl Placeholders {
    /// Ids of the form `slide_{index}_{role}`, for dry runs where no real page exists.
    pub fn numbered(index: usize) -> Self {
        let id = |role: &str| Some(format!("slide_{index}_{role}"));
        Placeholders {
            page: Some(format!("slide_{index}")),
            title: id("title"),
            subtitle: id("subtitle"),
            body: id("body"),
        }
    }
}

/// Object ids of the cover's placeholders. Date and app name are skipped when absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoverPlaceholders {
    pub title: Option<String>,
    pub date: Option<String>,
    pub app_name: Option<String>,
    pub subtitle: Option<String>,
}

impl CoverPlaceholders {
    /// Ids of the form `cover_{role}`, for dry runs.
    pub fn numbered() -> Self {
        let id = |role: &str| Some(format!("cover_{role}"));
        CoverPlaceholders {
            title: id("title"),
            date: id("date"),
            app_name: id("app_name"),
            subtitle: id("subtitle"),
        }
    }
}

/// Size and position of a slide image, in EMU.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageFrame {
    pub width: f64,
    pub height: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Default for ImageFrame {
    /// A 3 inch square in the middle of the chapter layout.
    fn default() -> Self {
        ImageFrame {
            width: 2_743_200.0,
            height: 2_743_200.0,
            translate_x: 1_213_950.0,
            translate_y: 1_659_800.0,
        }
    }
}

impl ImageFrame {
    fn create_image(&self, page: &str, image_id: &str, url: &str) -> EditOp {
        let emu = |magnitude: f64| json!({"magnitude": magnitude, "unit": "EMU"});
        EditOp::Raw {
            kind: "createImage".to_string(),
            payload: json!({
                "objectId": image_id,
                "url": url,
                "elementProperties": {
                    "pageObjectId": page,
                    "size": {"width": emu(self.width), "height": emu(self.height)},
                    "transform": {
                        "scaleX": 1.0,
                        "scaleY": 1.0,
                        "translateX": self.translate_x,
                        "translateY": self.translate_y,
                        "unit": "EMU",
                    },
                },
            }),
        }
    }
}

/// Scheduled ops for one placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerEdit {
    pub container_id: String,
    pub ops: Vec<EditOp>,
}

/// Plans slides in deck order. Holds the chapter counter.
#[derive(Debug, Clone, Default)]
pub struct DeckPlanner {
    options: CompileOptions,
    image_frame: ImageFrame,
    next_chapter: usize,
}

impl DeckPlanner {
    pub fn new(options: CompileOptions) -> Self {
        DeckPlanner {
            options,
            image_frame: ImageFrame::default(),
            next_chapter: 0,
        }
    }

    pub fn with_image_frame(mut self, frame: ImageFrame) -> Self {
        self.image_frame = frame;
        self
    }

    /// Plans the cover from the deck title and subtitle. `date` is inserted as given.
    pub fn plan_cover(
        &self,
        presentation: &Presentation,
        placeholders: &CoverPlaceholders,
        date: &str,
    ) -> Result<Vec<ContainerEdit>, PlanError> {
        let title = placeholders
            .title
            .clone()
            .ok_or(PlanError::MissingCoverPlaceholder("title"))?;
        let subtitle = placeholders
            .subtitle
            .clone()
            .ok_or(PlanError::MissingCoverPlaceholder("subtitle"))?;

        let mut edits = Vec::new();
        push_plain(&mut edits, title, &presentation.title);
        if let Some(date_id) = &placeholders.date {
            push_plain(&mut edits, date_id.clone(), date);
        }
        if let Some(app_id) = &placeholders.app_name {
            push_plain(&mut edits, app_id.clone(), APP_NAME);
        }
        push_plain(&mut edits, subtitle, &presentation.subtitle);
        Ok(edits)
    }

    /// Plans the edits for the slide at `index`.
    pub fn plan_slide(
        &mut self,
        index: usize,
        slide: &Slide,
        placeholders: &Placeholders,
    ) -> Result<Vec<ContainerEdit>, PlanError> {
        let require = |id: &Option<String>, role: &'static str| {
            id.clone()
                .ok_or(PlanError::MissingPlaceholder { slide: index, role })
        };

        let mut edits = Vec::new();
        if slide.chapter {
            let title = require(&placeholders.title, "title")?;
            let body = require(&placeholders.body, "body")?;
            push_plain(&mut edits, title, &slide.title);
            push_plain(&mut edits, body, &self.next_chapter.to_string());
            self.next_chapter += 1;
        } else {
            let title = require(&placeholders.title, "title")?;
            let subtitle = require(&placeholders.subtitle, "subtitle")?;
            let body = require(&placeholders.body, "body")?;
            push_plain(&mut edits, title, &slide.title);
            push_plain(&mut edits, subtitle, &slide.subtitle);
            let runs = flatten(&parse_markdown(&slide.body)).runs;
            let ops = schedule(compile(&runs, &self.options).ops);
            if !ops.is_empty() {
                edits.push(ContainerEdit {
                    container_id: body,
                    ops,
                });
            }
        }

        let url = slide.illustration.url.trim();
        if !url.is_empty() {
            let page = require(&placeholders.page, "page")?;
            let image_id = format!("{page}_illustration");
            let mut ops = vec![self.image_frame.create_image(&page, &image_id, url)];
            if !slide.illustration.alt.is_empty() {
                ops.push(EditOp::Raw {
                    kind: "updatePageElementAltText".to_string(),
                    payload: json!({
                        "objectId": image_id,
                        "description": slide.illustration.alt,
                    }),
                });
            }
            edits.push(ContainerEdit {
                container_id: page,
                ops,
            });
        }

        tracing::debug!(
            slide = index,
            chapter = slide.chapter,
            containers = edits.len(),
            "planned slide"
        );
        Ok(edits)
    }

    /// Plans every slide, taking placeholder ids from `placeholders_for(index)`.
    pub fn plan_presentation<F>(
        &mut self,
        presentation: &Presentation,
        placeholders_for: F,
    ) -> Result<Vec<ContainerEdit>, PlanError>
    where
        F: Fn(usize) -> Placeholders,
    {
        let mut edits = Vec::new();
        for (index, slide) in presentation.slides.iter().enumerate() {
            edits.extend(self.plan_slide(index, slide, &placeholders_for(index))?);
        }
        Ok(edits)
    }
}

fn push_plain(edits: &mut Vec<ContainerEdit>, container_id: String, text: &str) {
    if text.is_empty() {
        return;
    }
    edits.push(ContainerEdit {
        container_id,
        ops: vec![EditOp::InsertText {
            at: 0,
            text: text.to_string(),
        }],
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content_slide(body: &str) -> Slide {
        Slide {
            title: "Title".to_string(),
            subtitle: "Sub".to_string(),
            body: body.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn reads_generator_json() {
        let json = r#"{
            "presentation_title": "Deck",
            "presentation_subtitle": "About things",
            "slides": [
                {"title": "Intro", "chapter": true, "body": "why"},
                {"title": "Point", "subtitle": "s", "body": "- a\n- b",
                 "illustration": {"prompt": "a cat", "alt": "cat"}}
            ]
        }"#;

        let presentation = Presentation::from_json(json).unwrap();

        assert_eq!(presentation.title, "Deck");
        assert_eq!(presentation.slides.len(), 2);
        assert!(presentation.slides[0].chapter);
        assert!(presentation.slides[0].illustration.is_empty());
        assert_eq!(presentation.slides[1].illustration.alt, "cat");
    }

    #[test]
    fn invalid_json_is_reported() {
        assert!(matches!(
            Presentation::from_json("{\"slides\": 3}"),
            Err(PlanError::InvalidPresentation(_))
        ));
    }

    #[test]
    fn content_slide_fills_three_placeholders() {
        let mut planner = DeckPlanner::default();
        let edits = planner
            .plan_slide(0, &content_slide("a **b**"), &Placeholders::numbered(0))
            .unwrap();

        let ids: Vec<&str> = edits.iter().map(|e| e.container_id.as_str()).collect();
        assert_eq!(ids, vec!["slide_0_title", "slide_0_subtitle", "slide_0_body"]);
        assert_eq!(
            edits[2].ops,
            vec![
                EditOp::InsertText {
                    at: 0,
                    text: "a ".to_string()
                },
                EditOp::InsertText {
                    at: 2,
                    text: "b".to_string()
                },
                EditOp::SetStyle {
                    range: 2..3,
                    bold: true,
                    italic: false
                },
            ]
        );
    }

    #[test]
    fn chapters_are_numbered_in_order() {
        let mut planner = DeckPlanner::default();
        let chapter = Slide {
            title: "Part".to_string(),
            chapter: true,
            ..Default::default()
        };

        let first = planner
            .plan_slide(0, &chapter, &Placeholders::numbered(0))
            .unwrap();
        let second = planner
            .plan_slide(1, &chapter, &Placeholders::numbered(1))
            .unwrap();

        assert_eq!(
            first[1].ops,
            vec![EditOp::InsertText {
                at: 0,
                text: "0".to_string()
            }]
        );
        assert_eq!(
            second[1].ops,
            vec![EditOp::InsertText {
                at: 0,
                text: "1".to_string()
            }]
        );
    }

    #[test]
    fn missing_placeholder_is_an_error() {
        let mut planner = DeckPlanner::default();
        let placeholders = Placeholders {
            subtitle: None,
            ..Placeholders::numbered(4)
        };

        let err = planner
            .plan_slide(4, &content_slide("x"), &placeholders)
            .unwrap_err();

        assert_eq!(
            err,
            PlanError::MissingPlaceholder {
                slide: 4,
                role: "subtitle"
            }
        );
    }

    #[test]
    fn empty_texts_produce_no_edits() {
        let mut planner = DeckPlanner::default();
        let slide = Slide {
            title: "Only a title".to_string(),
            ..Default::default()
        };

        let edits = planner
            .plan_slide(0, &slide, &Placeholders::numbered(0))
            .unwrap();

        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].container_id, "slide_0_title");
    }

    #[test]
    fn cover_gets_title_date_app_and_subtitle() {
        let presentation = Presentation {
            title: "Deck".to_string(),
            subtitle: "About things".to_string(),
            ..Default::default()
        };

        let edits = DeckPlanner::default()
            .plan_cover(&presentation, &CoverPlaceholders::numbered(), "10/16/2026")
            .unwrap();

        let filled: Vec<(&str, &EditOp)> = edits
            .iter()
            .map(|e| (e.container_id.as_str(), &e.ops[0]))
            .collect();
        let insert = |text: &str| EditOp::InsertText {
            at: 0,
            text: text.to_string(),
        };
        assert_eq!(
            filled,
            vec![
                ("cover_title", &insert("Deck")),
                ("cover_date", &insert("10/16/2026")),
                ("cover_app_name", &insert(APP_NAME)),
                ("cover_subtitle", &insert("About things")),
            ]
        );
    }

    #[test]
    fn cover_without_optional_placeholders() {
        let placeholders = CoverPlaceholders {
            date: None,
            app_name: None,
            ..CoverPlaceholders::numbered()
        };
        let presentation = Presentation {
            title: "Deck".to_string(),
            ..Default::default()
        };

        let edits = DeckPlanner::default()
            .plan_cover(&presentation, &placeholders, "today")
            .unwrap();
        assert_eq!(edits.len(), 1);

        let err = DeckPlanner::default()
            .plan_cover(&presentation, &CoverPlaceholders::default(), "today")
            .unwrap_err();
        assert_eq!(err, PlanError::MissingCoverPlaceholder("title"));
    }

    #[test]
    fn uploaded_illustration_becomes_an_image_on_the_page() {
        let slide = Slide {
            title: "Part".to_string(),
            chapter: true,
            illustration: Illustration {
                prompt: "a cat".to_string(),
                alt: "cat".to_string(),
                url: "https://example.com/cat.png".to_string(),
            },
            ..Default::default()
        };

        let edits = DeckPlanner::default()
            .plan_slide(2, &slide, &Placeholders::numbered(2))
            .unwrap();

        let image = edits.last().unwrap();
        assert_eq!(image.container_id, "slide_2");
        let kinds: Vec<&str> = image.ops.iter().map(EditOp::kind_name).collect();
        assert_eq!(kinds, vec!["createImage", "updatePageElementAltText"]);
        match &image.ops[0] {
            EditOp::Raw { payload, .. } => {
                assert_eq!(payload["objectId"], "slide_2_illustration");
                assert_eq!(payload["url"], "https://example.com/cat.png");
                assert_eq!(payload["elementProperties"]["pageObjectId"], "slide_2");
                assert_eq!(
                    payload["elementProperties"]["size"]["width"]["magnitude"],
                    2_743_200.0
                );
            }
            other => panic!("expected a raw request, got {other:?}"),
        }
    }

    #[test]
    fn illustration_without_url_is_not_placed() {
        let slide = Slide {
            illustration: Illustration {
                prompt: "a cat".to_string(),
                ..Default::default()
            },
            ..content_slide("x")
        };

        let edits = DeckPlanner::default()
            .plan_slide(0, &slide, &Placeholders::numbered(0))
            .unwrap();

        assert!(edits.iter().all(|e| e.container_id != "slide_0"));
    }

    #[test]
    fn image_needs_a_page() {
        let slide = Slide {
            illustration: Illustration {
                url: "https://example.com/x.png".to_string(),
                ..Default::default()
            },
            ..content_slide("x")
        };
        let placeholders = Placeholders {
            page: None,
            ..Placeholders::numbered(1)
        };

        let err = DeckPlanner::default()
            .plan_slide(1, &slide, &placeholders)
            .unwrap_err();
        assert_eq!(
            err,
            PlanError::MissingPlaceholder {
                slide: 1,
                role: "page"
            }
        );
    }

    #[test]
    fn presentation_plans_every_slide() {
        let presentation = Presentation {
            slides: vec![content_slide("x"), content_slide("y")],
            ..Default::default()
        };

        let edits = DeckPlanner::default()
            .plan_presentation(&presentation, Placeholders::numbered)
            .unwrap();

        assert_eq!(edits.len(), 6);
        assert_eq!(edits[5].container_id, "slide_1_body");
    }
}
