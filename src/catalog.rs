//! Static business data served by the public API

use crate::models::{CompanyInfo, ServiceOffering};

pub const SERVICES: &[ServiceOffering] = &[
    ServiceOffering {
        id: "furniture",
        name: "Furniture",
        description: "Custom and modern furniture solutions for homes and offices",
        features: &["Custom Design", "Quality Materials", "Expert Installation"],
    },
    ServiceOffering {
        id: "curtains",
        name: "Curtains",
        description: "Elegant curtains and window treatments for every space",
        features: &["Custom Fitting", "Premium Fabrics", "Professional Installation"],
    },
    ServiceOffering {
        id: "carpets",
        name: "Carpets & Rugs",
        description: "Premium carpets and rugs to enhance your floor aesthetics",
        features: &["Quality Materials", "Various Designs", "Professional Laying"],
    },
    ServiceOffering {
        id: "wallpapers",
        name: "Wallpapers",
        description: "Stunning wallpaper designs to transform your walls",
        features: &["Modern Designs", "Quality Materials", "Expert Installation"],
    },
    ServiceOffering {
        id: "fabric",
        name: "Fabric & Upholstery",
        description: "Quality fabrics and upholstery services for furniture",
        features: &["Premium Fabrics", "Custom Designs", "Professional Service"],
    },
    ServiceOffering {
        id: "complete",
        name: "Complete Decor",
        description: "Full home and office decoration and branding solutions",
        features: &["Complete Design", "Project Management", "Turnkey Solutions"],
    },
];

pub const COMPANY: CompanyInfo = CompanyInfo {
    name: "Etana Interiors",
    description: "Your premier interior design partner in Kenya",
    email: "sales@etanainteriors.co.ke",
    phone: "+254700188923",
    instagram: "https://www.instagram.com/etanainteriors",
    location: "Nairobi, Kenya",
    established: "2020",
    specialties: &[
        "Furniture Design",
        "Curtains & Window Treatments",
        "Carpets & Rugs",
        "Wallpapers",
        "Fabric & Upholstery",
        "Complete Home Decor",
        "Office Branding",
    ],
};

pub fn is_known_service(id: &str) -> bool {
    SERVICES.iter().any(|s| s.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_ids_unique() {
        let mut ids: Vec<_> = SERVICES.iter().map(|s| s.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), SERVICES.len());
    }

    #[test]
    fn test_is_known_service() {
        assert!(is_known_service("furniture"));
        assert!(is_known_service("complete"));
        assert!(!is_known_service("plumbing"));
        assert!(!is_known_service(""));
    }
}
