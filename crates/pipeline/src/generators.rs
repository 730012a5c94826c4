//! Deterministic mock generators, one per pipeline stage.
//!
//! Outputs are scripted from the product input so demo runs are
//! reproducible; only the simulated cost and generated asset ids vary.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use launchos_core::catalog::{Dimensions, ProductVariant};
use launchos_core::listing::{Aida, CopyPayload};
use launchos_core::marketplace::MARKETPLACE_MERCADOLIVRE;
use launchos_core::media::{MediaAsset, VideoAsset, ROLE_DETAIL, ROLE_LIFESTYLE, TRACK_CREATIVE_ONLY, TRACK_LISTING_SAFE};
use launchos_core::merchant::{AiDisclosure, StructuredContent, SOURCE_TRAINED_ALGORITHMIC_MEDIA};

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// The product fields the generators read. Assembled by the api layer
/// from the product row and its media set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductInput {
    pub title_base: String,
    pub brand: String,
    pub sku_master: String,
    pub recipe: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub materials: Vec<String>,
    pub variants: Vec<ProductVariant>,
    pub dims: Dimensions,
}

/// Copy generation mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CopyMode {
    #[default]
    #[serde(rename = "AIDA")]
    Aida,
    #[serde(rename = "IADA")]
    Iada,
}

/// Everything a pipeline run needs.
#[derive(Debug, Clone, Default)]
pub struct PipelineInput {
    pub product: ProductInput,
    pub photos: Vec<MediaAsset>,
    pub marketplace_key: String,
    pub copy_mode: CopyMode,
    pub include_creatives: bool,
}

// ---------------------------------------------------------------------------
// Vision
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionResult {
    pub detected_attributes: Value,
    pub confidence: f64,
    pub missing_fields: Vec<String>,
}

/// Detect visual attributes from the product's photos.
pub fn run_vision(product: &ProductInput, photos: &[MediaAsset]) -> VisionResult {
    let mut detected = Map::new();
    detected.insert(
        "category".to_string(),
        json!(product.category.clone().unwrap_or_else(|| "Vestuário".to_string())),
    );
    detected.insert(
        "color_primary".to_string(),
        json!(product
            .variants
            .first()
            .map(|v| v.color.clone())
            .unwrap_or_else(|| "Não detectado".to_string())),
    );
    detected.insert("pattern".to_string(), json!("Sólido"));
    detected.insert(
        "style".to_string(),
        json!(if product.recipe == "apparel" { "Casual" } else { "Kit" }),
    );
    detected.insert(
        "material_visual".to_string(),
        json!(product
            .materials
            .first()
            .cloned()
            .unwrap_or_else(|| "Não detectado".to_string())),
    );

    let mut missing_fields = Vec::new();
    if photos.len() < 3 {
        missing_fields.push("Recomendado mínimo 3 fotos".to_string());
    }
    if !photos.iter().any(|p| p.role == ROLE_DETAIL) {
        missing_fields.push("Falta foto de detalhe".to_string());
    }
    if product.description.as_deref().is_none_or(str::is_empty) {
        missing_fields.push("Descrição do produto vazia".to_string());
    }

    VisionResult {
        detected_attributes: Value::Object(detected),
        confidence: if photos.len() >= 3 { 0.92 } else { 0.75 },
        missing_fields,
    }
}

// ---------------------------------------------------------------------------
// Attributes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributesResult {
    pub filled_attributes: Value,
    pub gaps: Vec<String>,
}

/// Fill the marketplace-required attributes from the product record.
pub fn fill_required_attrs(product: &ProductInput, marketplace_key: &str) -> AttributesResult {
    let mut attrs = Map::new();
    attrs.insert("condition".to_string(), json!("new"));
    attrs.insert("brand".to_string(), json!(product.brand));
    attrs.insert("material".to_string(), json!(product.materials.join(", ")));
    attrs.insert(
        "weight_kg".to_string(),
        json!(format!("{:.2}", product.dims.weight_g / 1000.0)),
    );

    if marketplace_key == MARKETPLACE_MERCADOLIVRE {
        attrs.insert("listing_type".to_string(), json!("gold_special"));
        attrs.insert("warranty".to_string(), json!("30 dias contra defeitos"));
        attrs.insert("sku".to_string(), json!(product.sku_master));
    } else {
        attrs.insert("shop_voucher_applicable".to_string(), json!(true));
        attrs.insert("pre_order".to_string(), json!(false));
    }

    let mut gaps = Vec::new();
    if product.category.as_deref().is_none_or(str::is_empty) {
        gaps.push("Categoria não definida".to_string());
    }
    if product.variants.is_empty() {
        gaps.push("Sem variantes cadastradas".to_string());
    }

    AttributesResult {
        filled_attributes: Value::Object(attrs),
        gaps,
    }
}

// ---------------------------------------------------------------------------
// Copy
// ---------------------------------------------------------------------------

/// Generate listing copy in AIDA or IADA structure.
pub fn generate_copy(product: &ProductInput, marketplace_key: &str, mode: CopyMode) -> CopyPayload {
    let brand = &product.brand;
    let product_type = product
        .title_base
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string();
    let material = product
        .materials
        .first()
        .cloned()
        .unwrap_or_else(|| "tecido premium".to_string());

    let title_short = format!("{} {brand}", product.title_base);
    let title_long_tail = format!(
        "{} {brand} {} {}",
        product.title_base,
        product.variants.first().map(|v| v.color.as_str()).unwrap_or(""),
        product.materials.join(" ")
    )
    .trim()
    .to_string();

    let bullets = vec![
        format!("{material} de alta qualidade"),
        format!("Marca {brand} - garantia de procedência"),
        format!("Disponível em {} variações", product.variants.len()),
        format!(
            "Dimensões: {}x{}x{}cm",
            product.dims.length_cm, product.dims.width_cm, product.dims.height_cm
        ),
    ];

    let aida = match mode {
        CopyMode::Aida => Aida {
            attention: format!("Descubra o {product_type} perfeito para você!"),
            interest: format!(
                "{} confeccionado em {material} com acabamento premium.",
                product.title_base
            ),
            desire: format!(
                "Conforto e estilo que você merece. {} opções para combinar com seu estilo.",
                product.variants.len()
            ),
            action: if marketplace_key == MARKETPLACE_MERCADOLIVRE {
                "Compre agora e receba com frete grátis!".to_string()
            } else {
                "Adicione ao carrinho e aproveite cupons exclusivos!".to_string()
            },
        },
        CopyMode::Iada => Aida {
            attention: format!("{} - Qualidade {brand}", product.title_base),
            interest: format!("Confeccionado em {material} premium para máximo conforto."),
            desire: format!(
                "{} variações disponíveis. Encontre a sua!",
                product.variants.len()
            ),
            action: "Garanta o seu agora mesmo!".to_string(),
        },
    };

    let mut keywords: Vec<String> = Vec::new();
    let mut push_unique = |kw: String| {
        if !kw.is_empty() && !keywords.contains(&kw) {
            keywords.push(kw);
        }
    };
    push_unique(product_type.to_lowercase());
    push_unique(brand.to_lowercase());
    for m in &product.materials {
        for word in m.to_lowercase().split_whitespace() {
            push_unique(word.to_string());
        }
    }
    push_unique(product.recipe.clone());
    if let Some(category) = &product.category {
        for part in category.to_lowercase().split(" > ") {
            push_unique(part.to_string());
        }
    }
    keywords.truncate(10);

    CopyPayload {
        title_short: title_short.chars().take(60).collect(),
        title_long_tail: title_long_tail.chars().take(200).collect(),
        bullets,
        aida,
        keywords,
    }
}

// ---------------------------------------------------------------------------
// Merchant
// ---------------------------------------------------------------------------

/// Produce the Merchant Center AI-content disclosure for the copy.
pub fn format_merchant(copy: &CopyPayload) -> AiDisclosure {
    AiDisclosure {
        use_structured: true,
        structured_title: Some(StructuredContent {
            digital_source_type: SOURCE_TRAINED_ALGORITHMIC_MEDIA.to_string(),
            content: copy.title_short.clone(),
        }),
        structured_description: Some(StructuredContent {
            digital_source_type: SOURCE_TRAINED_ALGORITHMIC_MEDIA.to_string(),
            content: format!("{} {}", copy.aida.interest, copy.aida.desire),
        }),
    }
}

// ---------------------------------------------------------------------------
// Guard
// ---------------------------------------------------------------------------

/// Claims that trip compliance review on the target marketplaces.
const FORBIDDEN_CLAIMS: &[&str] = &["melhor", "único", "garantido", "milagroso", "revolucionário"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardResult {
    pub passed: bool,
    pub blockers: Vec<String>,
    pub risk_flags: Vec<String>,
}

/// Compliance check over the generated copy.
pub fn guard(copy: &CopyPayload, product: &ProductInput) -> GuardResult {
    let mut blockers = Vec::new();
    let mut risk_flags = Vec::new();

    let all_text = format!(
        "{} {} {} {} {} {} {}",
        copy.title_short,
        copy.title_long_tail,
        copy.bullets.join(" "),
        copy.aida.attention,
        copy.aida.interest,
        copy.aida.desire,
        copy.aida.action
    )
    .to_lowercase();

    for claim in FORBIDDEN_CLAIMS {
        if all_text.contains(claim) {
            risk_flags.push(format!("Termo potencialmente problemático: \"{claim}\""));
        }
    }

    if copy.bullets.len() < 3 {
        blockers.push("Mínimo 3 bullet points requeridos".to_string());
    }
    if copy.title_short.chars().count() < 20 {
        blockers.push("Título muito curto".to_string());
    }
    if copy.keywords.len() < 5 {
        risk_flags.push("Poucos keywords podem afetar busca".to_string());
    }
    if !product
        .materials
        .iter()
        .any(|m| all_text.contains(&m.to_lowercase()))
    {
        risk_flags.push("Material do produto não mencionado no copy".to_string());
    }

    GuardResult {
        passed: blockers.is_empty(),
        blockers,
        risk_flags,
    }
}

// ---------------------------------------------------------------------------
// Imagery
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhancedPhotos {
    pub photos: Vec<MediaAsset>,
    pub improvements: Vec<String>,
}

/// Produce enhanced copies of the listing-safe photos. Creative-only
/// assets are never enhanced.
pub fn enhance_images(photos: &[MediaAsset]) -> EnhancedPhotos {
    let photos = photos
        .iter()
        .filter(|p| p.track == TRACK_LISTING_SAFE)
        .map(|p| MediaAsset {
            id: format!("enhanced-{}", p.id),
            enhanced: true,
            ..p.clone()
        })
        .collect();

    EnhancedPhotos {
        photos,
        improvements: vec![
            "Brilho e contraste otimizados".to_string(),
            "Fundo padronizado para marketplace".to_string(),
            "Cores corrigidas para fidelidade".to_string(),
        ],
    }
}

/// Generate a lifestyle creative on the `creative_only` track.
pub fn generate_creatives(photos: &[MediaAsset]) -> Vec<MediaAsset> {
    let base_url = photos
        .first()
        .map(|p| p.url.clone())
        .unwrap_or_else(|| "/mock/lifestyle_base.jpg".to_string());
    vec![MediaAsset {
        id: format!("creative-lifestyle-{}", chrono::Utc::now().timestamp_millis()),
        role: ROLE_LIFESTYLE.to_string(),
        track: TRACK_CREATIVE_ONLY.to_string(),
        url: base_url,
        filename: "lifestyle_generated.jpg".to_string(),
        enhanced: false,
    }]
}

/// Generate a short vertical product video on the `creative_only` track.
pub fn generate_videos(_photos: &[MediaAsset]) -> Vec<VideoAsset> {
    vec![VideoAsset {
        id: format!("video-{}", chrono::Utc::now().timestamp_millis()),
        format: "9:16".to_string(),
        track: TRACK_CREATIVE_ONLY.to_string(),
        url: "/mock/generated_video.mp4".to_string(),
        filename: "product_video.mp4".to_string(),
        duration_secs: Some(15),
    }]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use launchos_core::media::ROLE_HERO;

    fn product() -> ProductInput {
        ProductInput {
            title_base: "Camiseta Básica Algodão".to_string(),
            brand: "Aurora".to_string(),
            sku_master: "TS-001".to_string(),
            recipe: "apparel".to_string(),
            category: Some("Vestuário > Camisetas".to_string()),
            description: Some("Camiseta básica de algodão penteado.".to_string()),
            materials: vec!["Algodão penteado".to_string()],
            variants: vec![
                ProductVariant {
                    size: "M".to_string(),
                    color: "Preto".to_string(),
                    sku_variant: "TS-001-M".to_string(),
                },
                ProductVariant {
                    size: "G".to_string(),
                    color: "Branco".to_string(),
                    sku_variant: "TS-001-G".to_string(),
                },
            ],
            dims: Dimensions {
                weight_g: 180.0,
                length_cm: 30.0,
                width_cm: 25.0,
                height_cm: 2.0,
            },
        }
    }

    fn photo(id: &str, role: &str, track: &str) -> MediaAsset {
        MediaAsset {
            id: id.to_string(),
            role: role.to_string(),
            track: track.to_string(),
            url: format!("/mock/{id}.jpg"),
            filename: format!("{id}.jpg"),
            enhanced: false,
        }
    }

    #[test]
    fn vision_confidence_depends_on_photo_count() {
        let p = product();
        let few = vec![photo("a", ROLE_HERO, TRACK_LISTING_SAFE)];
        let many = vec![
            photo("a", ROLE_HERO, TRACK_LISTING_SAFE),
            photo("b", ROLE_DETAIL, TRACK_LISTING_SAFE),
            photo("c", ROLE_HERO, TRACK_LISTING_SAFE),
        ];
        assert_eq!(run_vision(&p, &few).confidence, 0.75);
        assert_eq!(run_vision(&p, &many).confidence, 0.92);
    }

    #[test]
    fn vision_flags_missing_detail_photo() {
        let p = product();
        let photos = vec![photo("a", ROLE_HERO, TRACK_LISTING_SAFE)];
        let result = run_vision(&p, &photos);
        assert!(result
            .missing_fields
            .iter()
            .any(|f| f.contains("detalhe")));
    }

    #[test]
    fn attrs_differ_per_marketplace() {
        let p = product();
        let ml = fill_required_attrs(&p, "mercadolivre");
        let shopee = fill_required_attrs(&p, "shopee");
        assert!(ml.filled_attributes.get("listing_type").is_some());
        assert!(ml.filled_attributes.get("pre_order").is_none());
        assert!(shopee.filled_attributes.get("pre_order").is_some());
        assert!(shopee.filled_attributes.get("listing_type").is_none());
    }

    #[test]
    fn attrs_reports_gaps() {
        let mut p = product();
        p.category = None;
        p.variants.clear();
        let result = fill_required_attrs(&p, "shopee");
        assert_eq!(result.gaps.len(), 2);
    }

    #[test]
    fn copy_is_deterministic_and_bounded() {
        let p = product();
        let a = generate_copy(&p, "mercadolivre", CopyMode::Aida);
        let b = generate_copy(&p, "mercadolivre", CopyMode::Aida);
        assert_eq!(a, b);
        assert!(a.title_short.chars().count() <= 60);
        assert!(a.keywords.len() <= 10);
        assert_eq!(a.bullets.len(), 4);
    }

    #[test]
    fn copy_modes_produce_different_hooks() {
        let p = product();
        let aida = generate_copy(&p, "shopee", CopyMode::Aida);
        let iada = generate_copy(&p, "shopee", CopyMode::Iada);
        assert_ne!(aida.aida.attention, iada.aida.attention);
    }

    #[test]
    fn keywords_are_deduplicated() {
        let p = product();
        let copy = generate_copy(&p, "shopee", CopyMode::Aida);
        let mut sorted = copy.keywords.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), copy.keywords.len());
    }

    #[test]
    fn merchant_disclosure_marks_ai_content() {
        let p = product();
        let copy = generate_copy(&p, "mercadolivre", CopyMode::Aida);
        let disclosure = format_merchant(&copy);
        assert!(disclosure.use_structured);
        let title = disclosure.structured_title.unwrap();
        assert_eq!(title.digital_source_type, SOURCE_TRAINED_ALGORITHMIC_MEDIA);
        assert_eq!(title.content, copy.title_short);
    }

    #[test]
    fn guard_passes_generated_copy() {
        let p = product();
        let copy = generate_copy(&p, "mercadolivre", CopyMode::Aida);
        let result = guard(&copy, &p);
        assert!(result.passed, "blockers: {:?}", result.blockers);
    }

    #[test]
    fn guard_blocks_short_title() {
        let p = product();
        let mut copy = generate_copy(&p, "mercadolivre", CopyMode::Aida);
        copy.title_short = "Camiseta".to_string();
        let result = guard(&copy, &p);
        assert!(!result.passed);
        assert!(result.blockers.iter().any(|b| b.contains("curto")));
    }

    #[test]
    fn guard_flags_forbidden_claims() {
        let p = product();
        let mut copy = generate_copy(&p, "mercadolivre", CopyMode::Aida);
        copy.bullets.push("O melhor produto do mercado".to_string());
        let result = guard(&copy, &p);
        // A risk flag, not a blocker.
        assert!(result.passed);
        assert!(result.risk_flags.iter().any(|f| f.contains("melhor")));
    }

    #[test]
    fn enhance_skips_creative_only_assets() {
        let photos = vec![
            photo("a", ROLE_HERO, TRACK_LISTING_SAFE),
            photo("b", ROLE_LIFESTYLE, TRACK_CREATIVE_ONLY),
        ];
        let result = enhance_images(&photos);
        assert_eq!(result.photos.len(), 1);
        assert_eq!(result.photos[0].id, "enhanced-a");
        assert!(result.photos[0].enhanced);
    }

    #[test]
    fn creatives_land_on_creative_track() {
        let photos = vec![photo("a", ROLE_HERO, TRACK_LISTING_SAFE)];
        let creatives = generate_creatives(&photos);
        assert_eq!(creatives.len(), 1);
        assert_eq!(creatives[0].track, TRACK_CREATIVE_ONLY);
        assert_eq!(creatives[0].role, ROLE_LIFESTYLE);
    }

    #[test]
    fn videos_are_vertical_and_creative_only() {
        let videos = generate_videos(&[]);
        assert_eq!(videos[0].format, "9:16");
        assert_eq!(videos[0].track, TRACK_CREATIVE_ONLY);
    }
}
