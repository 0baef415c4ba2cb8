use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Create a tour package (no-op if the code exists)
    PackageCreate { code: String, name: String },

    /// List tour packages
    Packages,

    /// Create a tour in an existing package
    TourCreate {
        /// Tour package code
        package: String,

        title: String,

        #[arg(long, default_value_t = 0)]
        price: i32,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, default_value = "")]
        blurb: String,

        #[arg(long, default_value = "")]
        duration: String,

        #[arg(long, default_value = "")]
        bullets: String,

        #[arg(long, default_value = "")]
        keywords: String,

        #[arg(long, default_value = "Easy")]
        difficulty: String,

        #[arg(long, default_value = "Central Coast")]
        region: String,
    },

    /// List tours, optionally only those of one package
    Tours {
        #[arg(short, long)]
        package: Option<String>,
    },

    /// Import tours from a JSON seed file
    Import { file: String },

    /// Rate a tour on behalf of one customer
    Rate {
        tour_id: i64,
        customer_id: i64,
        score: i32,

        #[arg(short, long)]
        comment: Option<String>,
    },

    /// Give the same score to a tour for several customers, all or nothing
    RateMany {
        tour_id: i64,
        score: i32,

        #[arg(required = true, num_args = 1..)]
        customer_ids: Vec<i64>,
    },

    /// List ratings, either all or those of one tour
    Ratings {
        #[arg(short, long)]
        tour: Option<i64>,

        /// Zero-based page (only with --tour)
        #[arg(long)]
        page: Option<usize>,

        #[arg(long, default_value = "20")]
        size: usize,
    },

    /// Show one customer's rating of a tour
    Rating { tour_id: i64, customer_id: i64 },

    /// Update a rating; without --partial, an omitted comment is cleared
    Update {
        tour_id: i64,
        customer_id: i64,

        #[arg(short, long)]
        score: Option<i32>,

        #[arg(short, long)]
        comment: Option<String>,

        /// Only change the fields that are given
        #[arg(long)]
        partial: bool,
    },

    /// Delete one customer's rating of a tour
    Delete { tour_id: i64, customer_id: i64 },

    /// Average score of a tour
    Average { tour_id: i64 },

    /// Counts of packages, tours and ratings
    Stats,
}
