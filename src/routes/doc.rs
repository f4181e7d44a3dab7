use utoipa::{
    Modify, OpenApi,
    openapi::{
        self, OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest, SessionUser},
        cart::{AddToCartRequest, CartView, UpdateQuantityRequest},
        orders::{CheckoutRequest, OrderList, UpdateOrderStatusRequest},
        products::{CategoryList, ProductList},
        shared::{
            AddContributionRequest, BusinessList, CertificateList, CollectionList,
            ContributionList, LogCollectionRequest, MitraList, UserList,
        },
    },
    models::{
        BusinessProfile, CartItem, Certificate, Collection, MitraProfile, Order, OrderStatus,
        PaymentMethod, Product, ShippingAddress, SystemMetrics, SystemUser, UserRole,
        WasteContribution,
    },
    response::{ApiResponse, Meta},
    routes::{admin, auth, business, cart, customer, health, mitra, orders, params, products},
    stores::{
        ProductDraft, ProductPatch,
        shared::{
            BusinessDraft, BusinessPatch, CollectionPatch, ContributionPatch, MitraDraft,
            MitraPatch, SystemUserDraft, SystemUserPatch,
        },
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::register,
        products::list_products,
        products::list_categories,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        cart::view_cart,
        cart::add_to_cart,
        cart::update_quantity,
        cart::remove_from_cart,
        cart::clear_cart,
        orders::checkout,
        orders::last_order,
        orders::list_orders,
        orders::get_order,
        orders::download_invoice,
        admin::list_all_orders,
        admin::update_order_status,
        admin::system_metrics,
        admin::list_users,
        admin::create_user,
        admin::update_user,
        admin::list_mitras,
        admin::create_mitra,
        admin::update_mitra,
        admin::list_businesses,
        admin::create_business,
        admin::update_business,
        mitra::list_collections,
        mitra::log_collection,
        mitra::update_collection,
        mitra::download_report,
        business::list_contributions,
        business::add_contribution,
        business::update_contribution,
        business::list_collections,
        business::list_certificates,
        business::download_certificate,
        business::download_report,
        customer::download_report
    ),
    components(
        schemas(
            Product,
            PaymentMethod,
            CartItem,
            ShippingAddress,
            OrderStatus,
            Order,
            Collection,
            WasteContribution,
            MitraProfile,
            BusinessProfile,
            UserRole,
            SystemUser,
            SystemMetrics,
            Certificate,
            LoginRequest,
            RegisterRequest,
            LoginResponse,
            SessionUser,
            AddToCartRequest,
            UpdateQuantityRequest,
            CartView,
            CheckoutRequest,
            UpdateOrderStatusRequest,
            OrderList,
            ProductList,
            CategoryList,
            ProductDraft,
            ProductPatch,
            LogCollectionRequest,
            AddContributionRequest,
            CollectionPatch,
            ContributionPatch,
            MitraDraft,
            MitraPatch,
            BusinessDraft,
            BusinessPatch,
            SystemUserDraft,
            SystemUserPatch,
            CollectionList,
            ContributionList,
            MitraList,
            BusinessList,
            UserList,
            CertificateList,
            params::Pagination,
            params::ProductQuery,
            params::OrderListQuery,
            params::CollectionQuery,
            params::UserQuery,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<CartView>,
            ApiResponse<Order>,
            ApiResponse<OrderList>,
            ApiResponse<SystemMetrics>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Mock portal sessions"),
        (name = "Products", description = "Catalog endpoints"),
        (name = "Cart", description = "Session cart"),
        (name = "Orders", description = "Checkout, orders and invoices"),
        (name = "Admin", description = "Back-office endpoints"),
        (name = "Mitra", description = "Collection agent portal"),
        (name = "Business", description = "Business partner portal"),
        (name = "Customer", description = "Customer portal"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
