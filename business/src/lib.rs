pub mod application {
    pub mod history {
        pub mod buffer;
        pub mod flush;
        pub mod get_all;
        pub mod record;
    }
    pub mod pricing {
        pub mod lookup;
    }
    pub mod scan {
        pub mod session;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod history {
        pub mod errors;
        pub mod model;
        pub mod repository;
        pub mod use_cases {
            pub mod flush;
            pub mod get_all;
            pub mod record;
        }
    }
    pub mod pricing {
        pub mod classifier;
        pub mod errors;
        pub mod model;
        pub mod services;
        pub mod settings;
        pub mod use_cases {
            pub mod lookup;
        }
    }
    pub mod scan {
        pub mod errors;
        pub mod source;
        pub mod state;
    }
}
