use crate::models::ComponentType;

/// Static per-type base latency in milliseconds. The default arm covers
/// `Unknown` and any future variants.
pub fn base_latency_ms(kind: ComponentType) -> f64 {
    match kind {
        ComponentType::LoadBalancer => 5.0,
        ComponentType::ApiGateway => 10.0,
        ComponentType::Microservice => 50.0,
        ComponentType::Database => 20.0,
        ComponentType::Cache => 2.0,
        ComponentType::MessageQueue => 5.0,
        ComponentType::MlModel => 100.0,
        _ => 30.0,
    }
}

/// Static per-type base error rate, as a fraction in [0, 1].
pub fn base_error_rate(kind: ComponentType) -> f64 {
    match kind {
        ComponentType::Database => 0.01,
        ComponentType::Microservice => 0.02,
        ComponentType::MlModel => 0.03,
        ComponentType::Cache => 0.001,
        ComponentType::LoadBalancer => 0.001,
        ComponentType::ApiGateway => 0.005,
        ComponentType::MessageQueue => 0.005,
        _ => 0.02,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_types_use_default_coefficients() {
        assert_eq!(base_latency_ms(ComponentType::Unknown), 30.0);
        assert_eq!(base_error_rate(ComponentType::Unknown), 0.02);
    }

    #[test]
    fn cache_is_the_cheapest_hop() {
        for kind in [
            ComponentType::LoadBalancer,
            ComponentType::ApiGateway,
            ComponentType::Microservice,
            ComponentType::Database,
            ComponentType::MessageQueue,
            ComponentType::MlModel,
            ComponentType::Unknown,
        ] {
            assert!(base_latency_ms(ComponentType::Cache) < base_latency_ms(kind));
        }
    }
}
