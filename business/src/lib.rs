pub mod application {
    pub mod outfit {
        pub mod suggest;
    }
    pub mod resolution {
        pub mod resolver;
    }
}

pub mod domain {
    pub mod logger;
    pub mod outfit {
        pub mod errors;
        pub mod model;
        pub mod services;
        pub mod use_cases {
            pub mod suggest;
        }
    }
    pub mod resolution {
        pub mod errors;
        pub mod model;
        pub mod placeholder;
        pub mod services;
    }
    pub mod shared {
        pub mod value_objects;
    }
}
