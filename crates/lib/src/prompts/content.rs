//! # Content Prompts
//!
//! The instruction text sent to the model for each content type.
//! Every template carries exactly two placeholders: `{sector}` and `{topic}`.

// --- Press Release ---
pub const PRESS_RELEASE_TEMPLATE: &str = r#"Generate a structured press release for a company operating in the {sector} sector.
Headline:
Subheadline:
Company Announcement:
Key Quotes:
Impact:
Closing Statement:

The press release should follow standard formatting and ensure the tone is formal and business-oriented.
Topic: {topic}
"#;

// --- Guest Column ---
pub const GUEST_COLUMN_TEMPLATE: &str = r#"Write an expert guest column for an industry publication in the {sector} sector.
The article should provide deep insights on the topic: {topic}

Structure:
1. Compelling introduction
2. Well-structured arguments backed by data
3. Expert opinions
4. Future trends
5. Actionable strategies
6. Strong conclusion
"#;

// --- Leadership Article ---
pub const LEADERSHIP_ARTICLE_TEMPLATE: &str = r#"Generate a leadership article for a C-suite executive from a company in the {sector} sector.
Topic: {topic}

The article should include:
- Vision and values
- Industry expertise
- Key business decisions
- Innovations
- Leadership strategies
- Market positioning
"#;

// --- Blog Post ---
pub const BLOG_POST_TEMPLATE: &str = r#"Write a compelling and SEO-friendly blog post on {topic} in the {sector} sector.
The blog should be:
- Informative and engaging
- Include statistics
- Break down complex concepts
- End with a call to action
"#;

// --- Social Media ---
pub const SOCIAL_MEDIA_TEMPLATE: &str = r#"Generate engaging social media content for a company in the {sector} sector about {topic}.
Create content for:
1. LinkedIn (Professional tone)
2. Twitter (Concise, engaging)
3. Instagram (Visual, engaging)

Include relevant hashtags and call-to-action phrases.
"#;
