//! Built-in Kannada reply table
//!
//! Only one clip has been recorded so far, so every phrase points at it.

pub(super) const DEFAULT_LOCATOR: &str = "/static/audio/kannada_sample.mp3";

pub(super) const PHRASES: &[(&str, &str)] = &[
    // Greetings
    ("ನಮಸ್ಕಾರ", DEFAULT_LOCATOR),
    ("ಧನ್ಯವಾದಗಳು", DEFAULT_LOCATOR),
    ("ಸ್ವಾಗತ", DEFAULT_LOCATOR),
    // Assistant prompts
    ("ನಾನು ನಿಮಗೆ ಹೇಗೆ ಸಹಾಯ ಮಾಡಬಹುದು?", DEFAULT_LOCATOR),
    ("ಕ್ಷಮಿಸಿ, ನನಗೆ ಅರ್ಥವಾಗಲಿಲ್ಲ", DEFAULT_LOCATOR),
    ("ದಯವಿಟ್ಟು ನಿಮ್ಮ ಪ್ರಶ್ನೆಯನ್ನು ಮತ್ತೊಮ್ಮೆ ಕೇಳಿ", DEFAULT_LOCATOR),
    // Government schemes
    ("ಆಯುಷ್ಮಾನ್ ಭಾರತ್ ಎಂದರೇನು?", DEFAULT_LOCATOR),
    ("ಪಿಎಂ ಕಿಸಾನ್ ಸಮ್ಮಾನ್ ನಿಧಿಗೆ ನಾನು ಹೇಗೆ ಅರ್ಜಿ ಸಲ್ಲಿಸಬಹುದು?", DEFAULT_LOCATOR),
    ("MGNREGA ಎಂದರೇನು?", DEFAULT_LOCATOR),
    ("ಪಿಎಂ ಆವಾಸ್ ಯೋಜನೆಯ ಬಗ್ಗೆ ತಿಳಿಸಿ", DEFAULT_LOCATOR),
    ("ಉಜ್ವಲಾ ಯೋಜನೆಯು ಯಾವ ಪ್ರಯೋಜನಗಳನ್ನು ನೀಡುತ್ತದೆ?", DEFAULT_LOCATOR),
    // Health
    ("ಹತ್ತಿರದ ಸರ್ಕಾರಿ ಆಸ್ಪತ್ರೆಯನ್ನು ನಾನು ಹೇಗೆ ಕಂಡುಕೊಳ್ಳಬಹುದು?", DEFAULT_LOCATOR),
    (
        "ಸಾರ್ವತ್ರಿಕ ಲಸಿಕಾ ಕಾರ್ಯಕ್ರಮದ ಅಡಿಯಲ್ಲಿ ಯಾವ ಲಸಿಕೆಗಳನ್ನು ಉಚಿತವಾಗಿ ನೀಡಲಾಗುತ್ತದೆ?",
        DEFAULT_LOCATOR,
    ),
    // Education
    ("ವಿದ್ಯಾರ್ಥಿಗಳಿಗೆ ಯಾವ ವಿದ್ಯಾರ್ಥಿವೇತನಗಳು ಲಭ್ಯವಿವೆ?", DEFAULT_LOCATOR),
    ("ಶಿಕ್ಷಣ ಸಾಲಗಳಿಗೆ ನಾನು ಹೇಗೆ ಅರ್ಜಿ ಸಲ್ಲಿಸಬಹುದು?", DEFAULT_LOCATOR),
    // Governance
    ("ನಾನು ಭ್ರಷ್ಟಾಚಾರವನ್ನು ಹೇಗೆ ವರದಿ ಮಾಡಬಹುದು?", DEFAULT_LOCATOR),
    ("ಮಾಹಿತಿ ಹಕ್ಕು ಕಾಯ್ದೆ ಎಂದರೇನು?", DEFAULT_LOCATOR),
    // Disaster management
    ("ಪ್ರವಾಹದ ಸಮಯದಲ್ಲಿ ನಾನು ಏನು ಮಾಡಬೇಕು?", DEFAULT_LOCATOR),
    ("ಭೂಕಂಪಕ್ಕೆ ನಾನು ಹೇಗೆ ಸಿದ್ಧತೆ ಮಾಡಿಕೊಳ್ಳಬಹುದು?", DEFAULT_LOCATOR),
    // Citizen services
    ("ಭಾರತದ ನಾಗರಿಕನಾಗಿ ನನ್ನ ಹಕ್ಕುಗಳೇನು?", DEFAULT_LOCATOR),
    ("ಹೊಸ ಆಧಾರ್ ಕಾರ್ಡ್ ಅನ್ನು ನಾನು ಹೇಗೆ ಪಡೆಯಬಹುದು?", DEFAULT_LOCATOR),
    ("ನಾನು ಮತದಾನಕ್ಕೆ ಹೇಗೆ ನೋಂದಾಯಿಸಿಕೊಳ್ಳಬೇಕು?", DEFAULT_LOCATOR),
    // Status and error replies
    (
        "ನಿಮಗೆ ಬೇರೆ ಯಾವುದಾದರೂ ಪ್ರಶ್ನೆಗಳಿವೆಯೇ? ನಾನು ಸಹಾಯ ಮಾಡಲು ಸಂತೋಷಪಡುತ್ತೇನೆ.",
        DEFAULT_LOCATOR,
    ),
    (
        "ಕ್ಷಮಿಸಿ, ನಿಮ್ಮ ಪ್ರಶ್ನೆಗೆ ಉತ್ತರಿಸುವಲ್ಲಿ ನನಗೆ ತೊಂದರೆಯಾಗಿದೆ. ದಯವಿಟ್ಟು ಸೂಚಿಸಿದ ಪ್ರಶ್ನೆಗಳಲ್ಲಿ ಒಂದನ್ನು ಪ್ರಯತ್ನಿಸಿ.",
        DEFAULT_LOCATOR,
    ),
    (
        "ಕ್ಷಮಿಸಿ, ಸೇವೆಗೆ ಸಂಪರ್ಕಿಸುವಲ್ಲಿ ದೋಷವಿದೆ. ದಯವಿಟ್ಟು ನಂತರ ಮತ್ತೆ ಪ್ರಯತ್ನಿಸಿ.",
        DEFAULT_LOCATOR,
    ),
    ("ಧ್ವನಿ ಪ್ರತಿಕ್ರಿಯೆಗಳು ಈಗ ಸಕ್ರಿಯಗೊಂಡಿವೆ", DEFAULT_LOCATOR),
    (
        "ಧ್ವನಿ ಸೇವೆ ಪ್ರಸ್ತುತ ಲಭ್ಯವಿಲ್ಲ. ದಯವಿಟ್ಟು ನಿಮ್ಮ ಪ್ರಶ್ನೆಯನ್ನು ಟೈಪ್ ಮಾಡಿ.",
        DEFAULT_LOCATOR,
    ),
];
