//! Categorical selections that steer the generated creative.

use serde::{Deserialize, Serialize};

/// Marketing angle of the creative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hook {
    PainBased,
    MedicalStyle,
    NaturalHealing,
    Clickbait,
    Testimonial,
    DoctorStyle,
    LabScientific,
    ProductFocus,
}

impl Hook {
    pub const ALL: [Hook; 8] = [
        Hook::PainBased,
        Hook::MedicalStyle,
        Hook::NaturalHealing,
        Hook::Clickbait,
        Hook::Testimonial,
        Hook::DoctorStyle,
        Hook::LabScientific,
        Hook::ProductFocus,
    ];

    /// Name used inside the prompt
    pub fn name(&self) -> &'static str {
        match self {
            Hook::PainBased => "Pain-Based (Joints/Arteries)",
            Hook::MedicalStyle => "Medical/MRI/X-Ray",
            Hook::NaturalHealing => "Natural Healing/Herbal",
            Hook::Clickbait => "Clickbait/Shock",
            Hook::Testimonial => "Testimonial/Social",
            Hook::DoctorStyle => "Doctor Recommendation",
            Hook::LabScientific => "Scientific/Laboratory",
            Hook::ProductFocus => "Product Focus",
        }
    }

    /// Extra art direction for the image model; not every hook has one
    pub fn prompt_modifier(&self) -> Option<&'static str> {
        match self {
            Hook::PainBased => Some(
                "Show a visual representation of physical pain, inflamed joints, red arteries, or elderly people experiencing discomfort. High contrast, warm heatmap overlay styles.",
            ),
            Hook::MedicalStyle => Some(
                "Medical imaging style, MRI blue tones, X-ray transparency, detailed anatomical cross-section of human organs or joints. Clean, sterile, professional look.",
            ),
            Hook::NaturalHealing => Some(
                "Soft natural lighting, macro photography of ginger, honey, herbs, green leaves. Eco-friendly atmosphere, wooden textures, freshness.",
            ),
            Hook::Clickbait => Some(
                "Viral thumbnail style, high saturation, dramatic lighting, use of red attention-grabbing elements, close-up of skin textures or 'shocking' transformations.",
            ),
            Hook::DoctorStyle => Some(
                "A trustworthy doctor in a white coat pointing at a chart or holding a generic bottle. Clinic background, bright lighting, reassuring expression.",
            ),
            Hook::LabScientific => Some(
                "Microscopic view, cellular structures, DNA double helix, floating molecules, laboratory glassware, futuristic blue and cyan lighting.",
            ),
            Hook::Testimonial | Hook::ProductFocus => None,
        }
    }
}

/// Rendering style of the generated image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualStyle {
    Realism,
    AppleMinimal,
    MedicalCgi,
    Illustration,
    Sketch,
    Macro,
    PixelArt,
    Comic,
    Isometric3d,
    UgcNative,
    HeatmapXray,
    CollageMix,
    BlueprintTech,
    NewsTv,
    RetroWave,
    GothicDark,
    MinimalLine,
    Claymorphism,
}

impl VisualStyle {
    pub const ALL: [VisualStyle; 18] = [
        VisualStyle::Realism,
        VisualStyle::MedicalCgi,
        VisualStyle::UgcNative,
        VisualStyle::HeatmapXray,
        VisualStyle::NewsTv,
        VisualStyle::CollageMix,
        VisualStyle::BlueprintTech,
        VisualStyle::AppleMinimal,
        VisualStyle::Illustration,
        VisualStyle::Sketch,
        VisualStyle::Macro,
        VisualStyle::PixelArt,
        VisualStyle::Comic,
        VisualStyle::Isometric3d,
        VisualStyle::RetroWave,
        VisualStyle::GothicDark,
        VisualStyle::MinimalLine,
        VisualStyle::Claymorphism,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            VisualStyle::Realism => "Photorealism",
            VisualStyle::AppleMinimal => "Apple/Clean Minimal",
            VisualStyle::MedicalCgi => "Medical CGI/3D",
            VisualStyle::Illustration => "Illustration",
            VisualStyle::Sketch => "Hand Drawn Sketch",
            VisualStyle::Macro => "Macro Photography",
            VisualStyle::PixelArt => "Pixel Art",
            VisualStyle::Comic => "Comic Book/Pop Art",
            VisualStyle::Isometric3d => "Isometric 3D Clay",
            VisualStyle::UgcNative => "UGC/TikTok Style (Amateur)",
            VisualStyle::HeatmapXray => "Thermal/Heatmap X-Ray",
            VisualStyle::CollageMix => "Scrapbook/Collage",
            VisualStyle::BlueprintTech => "Technical Blueprint/Schematic",
            VisualStyle::NewsTv => "Breaking News/TV Interface",
            VisualStyle::RetroWave => "Retro Wave/Synth",
            VisualStyle::GothicDark => "Gothic/Dark Mood",
            VisualStyle::MinimalLine => "Minimal Line Art",
            VisualStyle::Claymorphism => "Soft Claymorphism",
        }
    }
}

/// Health niche the offer belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vertical {
    Joints,
    Cardio,
    WeightLoss,
    Diabetes,
    Potency,
    Vision,
    Skin,
    Parasites,
}

impl Vertical {
    pub const ALL: [Vertical; 8] = [
        Vertical::Joints,
        Vertical::Cardio,
        Vertical::WeightLoss,
        Vertical::Diabetes,
        Vertical::Potency,
        Vertical::Vision,
        Vertical::Parasites,
        Vertical::Skin,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Vertical::Joints => "Joints/Pain",
            Vertical::Cardio => "Cardio/Heart",
            Vertical::WeightLoss => "Weight Loss/Diet",
            Vertical::Diabetes => "Diabetes/Sugar",
            Vertical::Potency => "Potency/Men Health",
            Vertical::Vision => "Vision/Eyes",
            Vertical::Skin => "Skin/Rejuvenation",
            Vertical::Parasites => "Parasites/Detox",
        }
    }

    /// Hooks that tend to convert for this niche
    pub fn recommended_hooks(&self) -> &'static [Hook] {
        match self {
            Vertical::Joints => &[Hook::PainBased, Hook::MedicalStyle, Hook::DoctorStyle],
            Vertical::Cardio => &[Hook::MedicalStyle, Hook::PainBased, Hook::NaturalHealing],
            Vertical::WeightLoss => &[Hook::Clickbait, Hook::Testimonial, Hook::ProductFocus],
            Vertical::Diabetes => &[Hook::MedicalStyle, Hook::NaturalHealing],
            Vertical::Potency => &[Hook::NaturalHealing, Hook::ProductFocus],
            Vertical::Vision => &[Hook::LabScientific, Hook::MedicalStyle],
            Vertical::Parasites => &[Hook::Clickbait, Hook::LabScientific],
            Vertical::Skin => &[Hook::Clickbait, Hook::Testimonial, Hook::ProductFocus],
        }
    }
}

/// Target audience language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    Russian,
    English,
    Spanish,
    Portuguese,
    Hindi,
    German,
    French,
    Italian,
}

impl Language {
    pub const ALL: [Language; 8] = [
        Language::Russian,
        Language::English,
        Language::Spanish,
        Language::Portuguese,
        Language::Hindi,
        Language::German,
        Language::French,
        Language::Italian,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Language::Russian => "ru",
            Language::English => "en",
            Language::Spanish => "es",
            Language::Portuguese => "pt",
            Language::Hindi => "hi",
            Language::German => "de",
            Language::French => "fr",
            Language::Italian => "it",
        }
    }

    pub fn native_name(&self) -> &'static str {
        match self {
            Language::Russian => "Русский",
            Language::English => "English",
            Language::Spanish => "Español",
            Language::Portuguese => "Português",
            Language::Hindi => "Hindi",
            Language::German => "Deutsch",
            Language::French => "Français",
            Language::Italian => "Italiano",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.code() == code)
    }
}
