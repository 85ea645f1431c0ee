//! Breed catalogue per pet type. Identifiers are the snake_case values the
//! mobile client sends in the `species` form field.

pub const DOG_SPECIES: &[&str] = &[
    "labrador",
    "poodle",
    "german_shepherd",
    "irish_wolfhound",
    "irish_setter",
    "afghan_hound",
    "american_cocker_spaniel",
    "american_staffordshire_terrier",
    "english_cocker_spaniel",
    "english_springer_spaniel",
    "west_highland_white_terrier",
    "welsh_corgi_pembroke",
    "airedale_terrier",
    "australian_shepherd",
    "kai_ken",
    "cavalier_king_charles_spaniel",
    "great_pyrenees",
    "keeshond",
    "cairn_terrier",
    "golden_retriever",
    "saluki",
    "shih_tzu",
    "shetland_sheepdog",
    "shiba_inu",
    "siberian_husky",
    "jack_russell_terrier",
    "scottish_terrier",
    "st_bernard",
    "dachshund",
    "dalmatian",
    "chinese_crested_dog",
    "chihuahua",
    "dogo_argentino",
    "doberman",
    "japanese_spitz",
    "bernese_mountain_dog",
    "pug",
    "basset_hound",
    "papillon",
    "bearded_collie",
    "beagle",
    "bichon_frise",
    "bouvier_des_flandres",
    "flat_coated_retriever",
    "bull_terrier",
    "bulldog",
    "french_bulldog",
    "pekinese",
    "bedlington_terrier",
    "belgian_tervuren",
    "border_collie",
    "boxer",
    "boston_terrier",
    "pomeranian",
    "borzoi",
    "maltese",
    "miniature_schnauzer",
    "miniature_pincher",
    "yorkshire_terrier",
    "rough_collie",
    "labrador_retriever",
    "rottweiler",
    "weimaraner",
];

pub const CAT_SPECIES: &[&str] = &[
    "siamese",
    "persian",
    "maine_coon",
    "american_curl",
    "american_shorthair",
    "egyptian_mau",
    "cornish_rex",
    "japanese_bobtail",
    "singapura",
    "scottish_fold",
    "somali",
    "turkish_angora",
    "tonkinese",
    "norwegian_forest_cat",
    "burmilla",
    "british_shorthair",
    "household_pet",
    "bengal",
    "munchkin",
    "ragdoll",
    "russian_blue",
];
