//! The static question catalog driving the trait forms and prompt building

use std::fmt;

/// Which form a question belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// About the user
    UserTraits,
    /// About the person being approached
    TargetTraits,
    /// About the situation
    GeneralInfo,
}

impl Category {
    /// All categories, in the order the forms are shown
    pub const ALL: [Category; 3] = [
        Category::UserTraits,
        Category::TargetTraits,
        Category::GeneralInfo,
    ];

    /// Section heading for the category's form
    pub fn title(&self) -> &'static str {
        match self {
            Category::UserTraits => "About You",
            Category::TargetTraits => "About Them",
            Category::GeneralInfo => "General Information",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A single form field and the prompt fragment it contributes
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    /// Field identifier, also the key in the profile draft
    pub id: &'static str,
    /// Caption shown next to the input
    pub label: &'static str,
    /// Prompt template sent alongside the answer
    pub prompt: &'static str,
    /// Generation weight sent alongside the answer
    pub temperature: f64,
    /// The form this question belongs to
    pub category: Category,
}

const fn question(
    category: Category,
    id: &'static str,
    label: &'static str,
    prompt: &'static str,
    temperature: f64,
) -> Question {
    Question {
        id,
        label,
        prompt,
        temperature,
        category,
    }
}

static QUESTIONS: [Question; 14] = [
    question(
        Category::UserTraits,
        "userAge",
        "Your age",
        "The person starting the conversation is this old:",
        0.3,
    ),
    question(
        Category::UserTraits,
        "userGender",
        "Your gender",
        "The person starting the conversation identifies as:",
        0.3,
    ),
    question(
        Category::UserTraits,
        "userInterests",
        "Your interests",
        "Things the person starting the conversation enjoys:",
        0.7,
    ),
    question(
        Category::UserTraits,
        "userPersonality",
        "Your personality",
        "Describe the tone of someone whose personality is:",
        0.8,
    ),
    question(
        Category::UserTraits,
        "userOccupation",
        "Your occupation",
        "The person starting the conversation works as:",
        0.5,
    ),
    question(
        Category::TargetTraits,
        "targetAge",
        "Their age",
        "The person being approached appears to be this old:",
        0.3,
    ),
    question(
        Category::TargetTraits,
        "targetGender",
        "Their gender",
        "The person being approached identifies as:",
        0.3,
    ),
    question(
        Category::TargetTraits,
        "targetInterests",
        "Their interests",
        "Things the person being approached seems to enjoy:",
        0.7,
    ),
    question(
        Category::TargetTraits,
        "targetAppearance",
        "What stands out about them",
        "Something noticeable about the person being approached:",
        0.8,
    ),
    question(
        Category::TargetTraits,
        "targetVibe",
        "Their vibe",
        "The overall energy the person being approached gives off:",
        0.9,
    ),
    question(
        Category::GeneralInfo,
        "location",
        "Where are you?",
        "The conversation takes place at:",
        0.5,
    ),
    question(
        Category::GeneralInfo,
        "occasion",
        "What's the occasion?",
        "The occasion or event bringing them together:",
        0.6,
    ),
    question(
        Category::GeneralInfo,
        "sharedContext",
        "Anything you have in common?",
        "Something both people share or have both noticed:",
        0.8,
    ),
    question(
        Category::GeneralInfo,
        "goal",
        "What are you hoping for?",
        "What the person starting the conversation hopes will come of it:",
        0.6,
    ),
];

/// Every question in the catalog
pub fn all_questions() -> &'static [Question] {
    &QUESTIONS
}

/// Look up a question by field id
pub fn find_question(id: &str) -> Option<&'static Question> {
    QUESTIONS.iter().find(|q| q.id == id)
}

/// The questions of one category, in display order
pub fn questions_in(category: Category) -> impl Iterator<Item = &'static Question> {
    QUESTIONS.iter().filter(move |q| q.category == category)
}
