//! Named material presets
//!
//! Presets are process-lifetime constants. Look them up by name
//! (case-insensitive) or by position in the preset tables, then copy the value
//! into a renderable.

use super::{PbrMaterial, PhongMaterial};

/// Metallic-roughness presets
pub mod pbr {
    use super::PbrMaterial;

    const fn m(albedo: [f32; 3], metallic: f32, roughness: f32, alpha: f32) -> PbrMaterial {
        PbrMaterial::new(albedo, metallic, roughness).with_alpha(alpha)
    }

    // Metals
    /// Polished gold
    pub const GOLD: PbrMaterial = m([1.0, 0.765557, 0.336057], 1.0, 0.3, 1.0);
    /// Polished silver
    pub const SILVER: PbrMaterial = m([0.972, 0.960, 0.915], 1.0, 0.2, 1.0);
    /// Copper
    pub const COPPER: PbrMaterial = m([0.955, 0.637, 0.538], 1.0, 0.4, 1.0);
    /// Bronze
    pub const BRONZE: PbrMaterial = m([0.804, 0.498, 0.196], 1.0, 0.5, 1.0);
    /// Chrome
    pub const CHROME: PbrMaterial = m([0.55, 0.55, 0.55], 1.0, 0.05, 1.0);
    /// Unpolished iron
    pub const ROUGH_IRON: PbrMaterial = m([0.56, 0.57, 0.58], 1.0, 0.8, 1.0);

    // Gems, slightly translucent
    /// Emerald
    pub const EMERALD: PbrMaterial = m([0.07568, 0.61424, 0.07568], 0.0, 0.3, 0.7);
    /// Jade
    pub const JADE: PbrMaterial = m([0.54, 0.89, 0.63], 0.0, 0.6, 0.85);
    /// Pearl
    pub const PEARL: PbrMaterial = m([1.0, 0.829, 0.829], 0.0, 0.5, 0.9);

    // Plastics and rubber
    /// Red plastic
    pub const RED_PLASTIC: PbrMaterial = m([0.8, 0.1, 0.1], 0.0, 0.4, 1.0);
    /// Black plastic
    pub const BLACK_PLASTIC: PbrMaterial = m([0.02, 0.02, 0.02], 0.0, 0.5, 1.0);
    /// White rubber
    pub const WHITE_RUBBER: PbrMaterial = m([0.8, 0.8, 0.8], 0.0, 0.9, 1.0);

    // Transparent
    /// Clear glass
    pub const GLASS: PbrMaterial = m([0.95, 0.95, 0.95], 0.0, 0.05, 0.3);
    /// Blue-tinted glass
    pub const COLORED_GLASS: PbrMaterial = m([0.4, 0.7, 0.9], 0.0, 0.1, 0.4);
    /// Frosted glass
    pub const FROSTED_GLASS: PbrMaterial = m([0.9, 0.9, 0.9], 0.0, 0.6, 0.5);
    /// Ice
    pub const ICE: PbrMaterial = m([0.85, 0.95, 1.0], 0.0, 0.15, 0.6);
    /// Water
    pub const WATER: PbrMaterial = m([0.1, 0.3, 0.5], 0.0, 0.1, 0.5);
    /// Amber
    pub const AMBER: PbrMaterial = m([1.0, 0.75, 0.0], 0.0, 0.3, 0.65);
    /// Crystal
    pub const CRYSTAL: PbrMaterial = m([0.95, 0.95, 1.0], 0.0, 0.05, 0.4);
}

/// Classic Phong presets (shininess already scaled by 128)
pub mod phong {
    use super::PhongMaterial;

    const fn m(ambient: [f32; 3], diffuse: [f32; 3], specular: [f32; 3], shininess: f32) -> PhongMaterial {
        PhongMaterial::new(ambient, diffuse, specular, shininess)
    }

    /// Emerald
    pub const EMERALD: PhongMaterial = m([0.0215, 0.1745, 0.0215], [0.07568, 0.61424, 0.07568], [0.633, 0.727811, 0.633], 76.8);
    /// Jade
    pub const JADE: PhongMaterial = m([0.135, 0.2225, 0.1575], [0.54, 0.89, 0.63], [0.316228, 0.316228, 0.316228], 12.8);
    /// Obsidian
    pub const OBSIDIAN: PhongMaterial = m([0.05375, 0.05, 0.06625], [0.18275, 0.17, 0.22525], [0.332741, 0.328634, 0.346435], 38.4);
    /// Pearl
    pub const PEARL: PhongMaterial = m([0.25, 0.20725, 0.20725], [1.0, 0.829, 0.829], [0.296648, 0.296648, 0.296648], 11.264);
    /// Ruby
    pub const RUBY: PhongMaterial = m([0.1745, 0.01175, 0.01175], [0.61424, 0.04136, 0.04136], [0.727811, 0.626959, 0.626959], 76.8);
    /// Turquoise
    pub const TURQUOISE: PhongMaterial = m([0.1, 0.18725, 0.1745], [0.396, 0.74151, 0.69102], [0.297254, 0.30829, 0.306678], 12.8);
    /// Brass
    pub const BRASS: PhongMaterial = m([0.329412, 0.223529, 0.027451], [0.780392, 0.568627, 0.113725], [0.992157, 0.941176, 0.807843], 27.897436);
    /// Bronze
    pub const BRONZE: PhongMaterial = m([0.2125, 0.1275, 0.054], [0.714, 0.4284, 0.18144], [0.393548, 0.271906, 0.166721], 25.6);
    /// Chrome
    pub const CHROME: PhongMaterial = m([0.25, 0.25, 0.25], [0.4, 0.4, 0.4], [0.774597, 0.774597, 0.774597], 76.8);
    /// Copper
    pub const COPPER: PhongMaterial = m([0.19125, 0.0735, 0.0225], [0.7038, 0.27048, 0.0828], [0.256777, 0.137622, 0.086014], 12.8);
    /// Gold
    pub const GOLD: PhongMaterial = m([0.24725, 0.1995, 0.0745], [0.75164, 0.60648, 0.22648], [0.628281, 0.555802, 0.366065], 51.2);
    /// Silver
    pub const SILVER: PhongMaterial = m([0.19225, 0.19225, 0.19225], [0.50754, 0.50754, 0.50754], [0.508273, 0.508273, 0.508273], 51.2);
    /// Black plastic
    pub const BLACK_PLASTIC: PhongMaterial = m([0.0, 0.0, 0.0], [0.01, 0.01, 0.01], [0.5, 0.5, 0.5], 32.0);
    /// Cyan plastic
    pub const CYAN_PLASTIC: PhongMaterial = m([0.0, 0.1, 0.06], [0.0, 0.509804, 0.509804], [0.501961, 0.501961, 0.501961], 32.0);
    /// Red plastic
    pub const RED_PLASTIC: PhongMaterial = m([0.0, 0.0, 0.0], [0.5, 0.0, 0.0], [0.7, 0.6, 0.6], 32.0);
    /// White rubber
    pub const WHITE_RUBBER: PhongMaterial = m([0.05, 0.05, 0.05], [0.5, 0.5, 0.5], [0.7, 0.7, 0.7], 10.0);
}

/// All PBR presets in declaration order
pub static PBR_PRESETS: [(&str, PbrMaterial); 19] = [
    ("Gold", pbr::GOLD),
    ("Silver", pbr::SILVER),
    ("Copper", pbr::COPPER),
    ("Bronze", pbr::BRONZE),
    ("Emerald", pbr::EMERALD),
    ("Jade", pbr::JADE),
    ("Pearl", pbr::PEARL),
    ("RedPlastic", pbr::RED_PLASTIC),
    ("BlackPlastic", pbr::BLACK_PLASTIC),
    ("WhiteRubber", pbr::WHITE_RUBBER),
    ("Glass", pbr::GLASS),
    ("ColoredGlass", pbr::COLORED_GLASS),
    ("FrostedGlass", pbr::FROSTED_GLASS),
    ("Ice", pbr::ICE),
    ("Water", pbr::WATER),
    ("Chrome", pbr::CHROME),
    ("RoughIron", pbr::ROUGH_IRON),
    ("Amber", pbr::AMBER),
    ("Crystal", pbr::CRYSTAL),
];

/// All Phong presets in declaration order
pub static PHONG_PRESETS: [(&str, PhongMaterial); 16] = [
    ("Emerald", phong::EMERALD),
    ("Jade", phong::JADE),
    ("Obsidian", phong::OBSIDIAN),
    ("Pearl", phong::PEARL),
    ("Ruby", phong::RUBY),
    ("Turquoise", phong::TURQUOISE),
    ("Brass", phong::BRASS),
    ("Bronze", phong::BRONZE),
    ("Chrome", phong::CHROME),
    ("Copper", phong::COPPER),
    ("Gold", phong::GOLD),
    ("Silver", phong::SILVER),
    ("BlackPlastic", phong::BLACK_PLASTIC),
    ("CyanPlastic", phong::CYAN_PLASTIC),
    ("RedPlastic", phong::RED_PLASTIC),
    ("WhiteRubber", phong::WHITE_RUBBER),
];

fn find<T: Copy>(table: &[(&str, T)], name: &str) -> Option<T> {
    let wanted: String = name.chars().filter(|c| *c != '_' && *c != ' ').collect();
    table
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(&wanted))
        .map(|(_, m)| *m)
}

impl PbrMaterial {
    /// Preset by name; case, spaces and underscores are ignored (`"red_plastic"`)
    pub fn preset(name: &str) -> Option<Self> {
        find(&PBR_PRESETS, name)
    }

    /// Preset by position in [`PBR_PRESETS`]
    pub fn preset_at(index: usize) -> Option<Self> {
        PBR_PRESETS.get(index).map(|(_, m)| *m)
    }
}

impl PhongMaterial {
    /// Preset by name; case, spaces and underscores are ignored
    pub fn preset(name: &str) -> Option<Self> {
        find(&PHONG_PRESETS, name)
    }

    /// Preset by position in [`PHONG_PRESETS`]
    pub fn preset_at(index: usize) -> Option<Self> {
        PHONG_PRESETS.get(index).map(|(_, m)| *m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::material::{Material, TRANSPARENCY_THRESHOLD};

    #[test]
    fn test_lookup_by_name_ignores_case_and_separators() {
        assert_eq!(PbrMaterial::preset("gold"), Some(pbr::GOLD));
        assert_eq!(PbrMaterial::preset("RED_PLASTIC"), Some(pbr::RED_PLASTIC));
        assert_eq!(PbrMaterial::preset("Frosted Glass"), Some(pbr::FROSTED_GLASS));
        assert_eq!(PhongMaterial::preset("cyanplastic"), Some(phong::CYAN_PLASTIC));
        assert_eq!(PbrMaterial::preset("unobtainium"), None);
    }

    #[test]
    fn test_lookup_by_index() {
        assert_eq!(PbrMaterial::preset_at(0), Some(pbr::GOLD));
        assert_eq!(PbrMaterial::preset_at(18), Some(pbr::CRYSTAL));
        assert_eq!(PbrMaterial::preset_at(19), None);
        assert_eq!(PhongMaterial::preset_at(15), Some(phong::WHITE_RUBBER));
    }

    #[test]
    fn test_glass_family_is_transparent_metals_are_not() {
        for (name, preset) in PBR_PRESETS.iter() {
            let transparent = Material::Pbr(*preset).is_transparent();
            assert_eq!(transparent, preset.alpha < TRANSPARENCY_THRESHOLD, "{name}");
            if preset.metallic == 1.0 {
                assert!(!transparent, "{name} should be opaque");
            }
        }
        assert!(Material::Pbr(pbr::GLASS).is_transparent());
        assert!(Material::Pbr(pbr::PEARL).is_transparent());
    }

    #[test]
    fn test_phong_presets_are_opaque() {
        assert!(PHONG_PRESETS.iter().all(|(_, m)| m.alpha == 1.0));
    }

    #[test]
    fn test_preset_names_unique() {
        let mut names: Vec<String> = PBR_PRESETS.iter().map(|(n, _)| n.to_lowercase()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), PBR_PRESETS.len());
    }
}
