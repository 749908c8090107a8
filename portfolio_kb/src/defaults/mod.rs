//! Built-in tables shipped with the portfolio page.

use crate::knowledge::{KeywordTable, KnowledgeBase, KnowledgeEntry};

/// Reply used by the question/answer widget when nothing matches.
pub const PAIRS_FALLBACK: &str =
    "I'm sorry, I'm just a demo bot. Please explore the site to learn more!";

/// Reply used by the keyword widget when nothing matches.
pub const KEYWORDS_FALLBACK: &str =
    "I'm sorry, I'm just a simple demo bot. Please explore the site to learn more!";

const GREETING: &str = "Hello! Thanks for visiting my portfolio. Feel free to ask me about my projects, experience or contact details.";

const SHORT_GREETING: &str = "Hello! Thanks for visiting my portfolio.";

/// The question/answer pairs embedded in the page.
pub fn portfolio_knowledge_base() -> KnowledgeBase {
    KnowledgeBase::new(vec![
        KnowledgeEntry::new(
            "tell me about umme",
            "Umme Athiya is an AI/ML engineer based in Chicago with over five years of experience. She specialises in large language models, generative AI and building scalable ML systems.",
        ),
        KnowledgeEntry::new(
            "what is llm",
            "LLM stands for Large Language Model – a type of neural network trained on vast amounts of text to understand and generate human‑like language.",
        ),
        KnowledgeEntry::new(
            "what projects have you worked on",
            "Some of my highlighted projects include SmartSign (ASL to text translation), RAGflix (movie scene retrieval using language models), ResumeRadar (resume assistant with OCR), DeepArt (neural style transfer) and SentimentScope (real‑time sentiment dashboard).",
        ),
        KnowledgeEntry::new(
            "how can i contact you",
            "You can get in touch via email (uathiya4@gmail.com), my personal website (ummeathiya.com), LinkedIn or GitHub – links are provided in the contact section.",
        ),
        KnowledgeEntry::new(
            "where did you study",
            "I earned my M.S. in Computer Science (AI) from DePaul University in Chicago and my B.E. in Information Science from Don Bosco Institute of Technology.",
        ),
        KnowledgeEntry::new(
            "what are your skills",
            "I work with Python, Java, C++, SQL, generative AI libraries, PyTorch, TensorFlow, MLflow, Docker, Kubernetes and many other tools. You can explore the Skills section for more details.",
        ),
        KnowledgeEntry::new("hello", GREETING),
        KnowledgeEntry::new("hi", GREETING),
    ])
}

/// The keyword rules embedded in the page, in lookup order.
pub fn portfolio_keywords() -> KeywordTable {
    [
        ("hello", SHORT_GREETING),
        ("hi", SHORT_GREETING),
        (
            "name",
            "I'm Umme Athiya, an AI/ML engineer specialising in generative AI.",
        ),
        (
            "experience",
            "I have over five years of experience spanning roles at DePaul University, IBM and various research internships.",
        ),
        (
            "projects",
            "You can explore my projects below – they include SmartSign, RAGflix, ResumeRadar and more.",
        ),
        (
            "contact",
            "Feel free to reach out via the links in the contact section below!",
        ),
    ]
    .into_iter()
    .collect()
}
