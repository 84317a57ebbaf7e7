use crate::catalog::schema::{Attribute, Category, Exclusion, PriorityTier, Scheme};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn scheme(
    id: &str,
    name: &str,
    name_local: &str,
    category: Category,
    ministry: &str,
    description: &str,
    apply_link: &str,
    helpline: &str,
) -> Scheme {
    Scheme {
        id: id.to_string(),
        name: name.to_string(),
        name_local: name_local.to_string(),
        category,
        ministry: ministry.to_string(),
        description: description.to_string(),
        benefits: Vec::new(),
        eligibility: Vec::new(),
        documents_required: Vec::new(),
        apply_link: apply_link.to_string(),
        helpline: Some(helpline.to_string()),
        interest_tags: Vec::new(),
        exclusions: Vec::new(),
        priority_tiers: Vec::new(),
    }
}

pub fn default_schemes() -> Vec<Scheme> {
    vec![
        pm_kisan(),
        pmfby(),
        kcc(),
        soil_health_card(),
        pmksy(),
        pm_kmy(),
        pkvy(),
        midh(),
        dedss(),
        nmsa(),
        e_nam(),
        smam(),
    ]
}

fn pm_kisan() -> Scheme {
    Scheme {
        benefits: strings(&[
            "₹6000 per year in 3 installments",
            "Direct bank transfer",
            "No intermediaries",
        ]),
        eligibility: strings(&[
            "Small and marginal farmers",
            "Landholding up to 2 hectares",
            "Valid Aadhaar card",
        ]),
        documents_required: strings(&[
            "Aadhaar Card",
            "Land records (Khatauni)",
            "Bank account details",
        ]),
        interest_tags: strings(&["subsidy"]),
        exclusions: vec![
            Exclusion::new(
                "Landholding ceiling",
                Attribute::LandSize,
                &["medium", "large"],
                "Land size exceeds the 2 hectare limit for PM-KISAN",
            ),
            Exclusion::new(
                "Land title",
                Attribute::FarmerType,
                &["tenant", "sharecropper"],
                "PM-KISAN requires cultivable land recorded in the farmer's name",
            ),
        ],
        ..scheme(
            "pm-kisan",
            "PM-KISAN",
            "पीएम-किसान सम्मान निधि",
            Category::Subsidy,
            "Ministry of Agriculture",
            "Direct income support of ₹6000/year to farmer families",
            "https://pmkisan.gov.in",
            "155261",
        )
    }
}

fn pmfby() -> Scheme {
    Scheme {
        benefits: strings(&[
            "Low premium (2% for Kharif, 1.5% for Rabi)",
            "Full insured sum on crop loss",
            "Covers natural calamities, pests, diseases",
        ]),
        eligibility: strings(&[
            "All farmers (loanee and non-loanee)",
            "Crops notified under the scheme",
        ]),
        documents_required: strings(&[
            "Aadhaar Card",
            "Land records",
            "Bank account",
            "Sowing certificate",
        ]),
        interest_tags: strings(&["insurance", "climate"]),
        ..scheme(
            "pmfby",
            "PM Fasal Bima Yojana",
            "प्रधानमंत्री फसल बीमा योजना",
            Category::Insurance,
            "Ministry of Agriculture",
            "Crop insurance scheme for farmers against crop loss",
            "https://pmfby.gov.in",
            "1800-180-1111",
        )
    }
}

fn kcc() -> Scheme {
    Scheme {
        benefits: strings(&[
            "Credit up to ₹3 lakh at 4% interest",
            "Interest subvention on timely repayment",
            "Flexible repayment options",
        ]),
        eligibility: strings(&["Owner cultivators", "Tenant farmers", "Sharecroppers"]),
        documents_required: strings(&[
            "Land ownership proof",
            "Identity proof",
            "Address proof",
            "Passport photo",
        ]),
        interest_tags: strings(&["credit"]),
        ..scheme(
            "kcc",
            "Kisan Credit Card",
            "किसान क्रेडिट कार्ड",
            Category::Credit,
            "Ministry of Finance",
            "Credit facility for farmers at low interest rates",
            "https://www.nabard.org",
            "1800-180-8087",
        )
    }
}

fn soil_health_card() -> Scheme {
    Scheme {
        benefits: strings(&[
            "Free soil testing",
            "Crop-wise fertilizer recommendations",
            "Improves soil health awareness",
        ]),
        eligibility: strings(&["All farmers with agricultural land"]),
        documents_required: strings(&["Aadhaar Card", "Land details"]),
        interest_tags: strings(&["subsidy", "organic"]),
        ..scheme(
            "soil-health-card",
            "Soil Health Card Scheme",
            "मृदा स्वास्थ्य कार्ड योजना",
            Category::Subsidy,
            "Ministry of Agriculture",
            "Free soil testing and health card for farmers",
            "https://soilhealth.dac.gov.in",
            "1800-180-1551",
        )
    }
}

fn pmksy() -> Scheme {
    Scheme {
        benefits: strings(&[
            "Subsidy on micro-irrigation (55-75%)",
            "Drip and sprinkler systems",
            "Water conservation support",
        ]),
        eligibility: strings(&[
            "All farmers with agricultural land",
            "Priority to small and marginal farmers",
        ]),
        documents_required: strings(&["Land records", "Bank details", "Application form"]),
        interest_tags: strings(&["irrigation", "subsidy", "climate"]),
        priority_tiers: vec![
            PriorityTier::new(
                Attribute::LandSize,
                &["marginal", "small"],
                "Higher micro-irrigation subsidy (55%) applies for small and marginal farmers",
            ),
            PriorityTier::new(
                Attribute::Category,
                &["sc", "st", "women"],
                "Additional subsidy share applies for SC, ST and women farmers",
            ),
        ],
        ..scheme(
            "pmksy",
            "PM Krishi Sinchai Yojana",
            "प्रधानमंत्री कृषि सिंचाई योजना",
            Category::Irrigation,
            "Ministry of Agriculture",
            "Irrigation and water use efficiency scheme",
            "https://pmksy.gov.in",
            "1800-180-1551",
        )
    }
}

fn pm_kmy() -> Scheme {
    Scheme {
        benefits: strings(&[
            "Assured pension of ₹3000 per month after 60",
            "Matching contribution by the government",
        ]),
        eligibility: strings(&[
            "Entry age 18 to 40 years",
            "Small and marginal farmers up to 2 hectares",
        ]),
        documents_required: strings(&["Aadhaar Card", "Savings bank account", "Land records"]),
        interest_tags: strings(&["pension"]),
        exclusions: vec![
            Exclusion::new(
                "Entry age",
                Attribute::Age,
                &["45-60", "60+"],
                "Entry age for PM-KMY is limited to 18-40 years",
            ),
            Exclusion::new(
                "Landholding ceiling",
                Attribute::LandSize,
                &["medium", "large"],
                "Land size exceeds the 2 hectare limit for PM-KMY",
            ),
        ],
        ..scheme(
            "pm-kmy",
            "PM Kisan Maandhan Yojana",
            "प्रधानमंत्री किसान मानधन योजना",
            Category::Pension,
            "Ministry of Agriculture",
            "Voluntary contributory pension scheme for small farmers",
            "https://maandhan.in",
            "1800-267-6888",
        )
    }
}

fn pkvy() -> Scheme {
    Scheme {
        benefits: strings(&[
            "₹50,000 per hectare over 3 years",
            "Support for organic certification",
        ]),
        eligibility: strings(&["Farmers organised in clusters of 20 hectares"]),
        documents_required: strings(&["Aadhaar Card", "Land records", "Cluster membership"]),
        interest_tags: strings(&["organic", "subsidy", "market"]),
        ..scheme(
            "pkvy",
            "Paramparagat Krishi Vikas Yojana",
            "परंपरागत कृषि विकास योजना",
            Category::Organic,
            "Ministry of Agriculture",
            "Cluster-based promotion of organic farming",
            "https://pgsindia-ncof.gov.in",
            "1800-180-1551",
        )
    }
}

fn midh() -> Scheme {
    Scheme {
        benefits: strings(&[
            "Assistance for orchards, nurseries and protected cultivation",
            "Post-harvest infrastructure support",
        ]),
        eligibility: strings(&["Farmers growing fruits, vegetables, spices or flowers"]),
        documents_required: strings(&["Land records", "Bank details", "Project proposal"]),
        interest_tags: strings(&["horticulture", "subsidy"]),
        priority_tiers: vec![PriorityTier::new(
            Attribute::Category,
            &["sc", "st"],
            "Higher assistance rate applies for SC and ST beneficiaries",
        )],
        ..scheme(
            "midh",
            "Mission for Integrated Development of Horticulture",
            "एकीकृत बागवानी विकास मिशन",
            Category::Horticulture,
            "Ministry of Agriculture",
            "Holistic growth of the horticulture sector",
            "https://midh.gov.in",
            "011-23382412",
        )
    }
}

fn dedss() -> Scheme {
    Scheme {
        benefits: strings(&[
            "25% back-ended capital subsidy on dairy units",
            "Bank loan for milch animals and chilling units",
        ]),
        eligibility: strings(&["Farmers, individual entrepreneurs and groups"]),
        documents_required: strings(&["Identity proof", "Project report", "Bank loan sanction"]),
        interest_tags: strings(&["dairy", "credit", "subsidy"]),
        priority_tiers: vec![PriorityTier::new(
            Attribute::Category,
            &["sc", "st"],
            "Capital subsidy of 33.33% applies instead of 25%",
        )],
        ..scheme(
            "dedss",
            "Dairy Entrepreneurship Development Scheme",
            "डेयरी उद्यमिता विकास योजना",
            Category::Dairy,
            "Ministry of Fisheries, Animal Husbandry and Dairying",
            "Capital subsidy for setting up modern dairy units",
            "https://www.nabard.org",
            "022-26539895",
        )
    }
}

fn nmsa() -> Scheme {
    Scheme {
        benefits: strings(&[
            "Support for climate-resilient farming practices",
            "Rainfed area development assistance",
        ]),
        eligibility: strings(&["All farmers, priority to rainfed areas"]),
        documents_required: strings(&["Aadhaar Card", "Land records"]),
        interest_tags: strings(&["climate", "irrigation", "organic"]),
        ..scheme(
            "nmsa",
            "National Mission for Sustainable Agriculture",
            "राष्ट्रीय सतत कृषि मिशन",
            Category::Climate,
            "Ministry of Agriculture",
            "Promotes sustainable and climate-resilient agriculture",
            "https://nmsa.dac.gov.in",
            "1800-180-1551",
        )
    }
}

fn e_nam() -> Scheme {
    Scheme {
        benefits: strings(&[
            "Online trading across regulated markets",
            "Transparent price discovery",
            "Direct payment to bank account",
        ]),
        eligibility: strings(&["All farmers with produce to sell"]),
        documents_required: strings(&["Aadhaar Card", "Bank account details", "Mobile number"]),
        interest_tags: strings(&["market"]),
        ..scheme(
            "e-nam",
            "National Agriculture Market (e-NAM)",
            "राष्ट्रीय कृषि बाजार",
            Category::Market,
            "Ministry of Agriculture",
            "Pan-India electronic trading portal for agricultural produce",
            "https://enam.gov.in",
            "1800-270-0224",
        )
    }
}

fn smam() -> Scheme {
    Scheme {
        benefits: strings(&[
            "40-50% subsidy on farm machinery",
            "Custom hiring centres for small farmers",
        ]),
        eligibility: strings(&["All farmers, higher rate for priority groups"]),
        documents_required: strings(&["Aadhaar Card", "Land records", "Bank details", "Quotation"]),
        interest_tags: strings(&["subsidy"]),
        priority_tiers: vec![
            PriorityTier::new(
                Attribute::Category,
                &["sc", "st", "women"],
                "Machinery subsidy of 50% applies instead of 40%",
            ),
            PriorityTier::new(
                Attribute::LandSize,
                &["marginal", "small"],
                "Machinery subsidy of 50% applies for small and marginal farmers",
            ),
        ],
        ..scheme(
            "smam",
            "Sub-Mission on Agricultural Mechanization",
            "कृषि यंत्रीकरण उप-मिशन",
            Category::Subsidy,
            "Ministry of Agriculture",
            "Subsidised farm machinery and custom hiring",
            "https://agrimachinery.nic.in",
            "1800-180-1551",
        )
    }
}
